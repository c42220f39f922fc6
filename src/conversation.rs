//! Conversation history types shared by the evaluation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single completed conversational turn.
///
/// Persistence layers have shipped two key layouts for the same record
/// (`user`/`assistant` and `user_message`/`response`); both deserialize
/// into this one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said in this turn.
    #[serde(alias = "user_message")]
    pub user: String,
    /// What the assistant replied.
    #[serde(alias = "response", default)]
    pub assistant: String,
}

impl ConversationTurn {
    /// Create a turn from a user message and the assistant's reply.
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    /// Parse a loose JSON history array into typed turns.
    ///
    /// Entries that are not objects, or that lack a user message under
    /// either known key, are skipped rather than failing the whole parse.
    pub fn parse_history(value: &Value) -> Vec<ConversationTurn> {
        let Some(items) = value.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value::<ConversationTurn>(item.clone()).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_history_accepts_both_key_layouts() {
        let history = json!([
            {"user": "Weather in Helsinki?", "assistant": "It's 3°C."},
            {"user_message": "Thanks!", "response": "Anytime."}
        ]);
        let turns = ConversationTurn::parse_history(&history);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].user, "Weather in Helsinki?");
        assert_eq!(turns[1].assistant, "Anytime.");
    }

    #[test]
    fn test_parse_history_skips_malformed_entries() {
        let history = json!([{"assistant": "orphan reply"}, 42, {"user": "hi", "assistant": "hello"}]);
        let turns = ConversationTurn::parse_history(&history);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].user, "hi");
    }
}
