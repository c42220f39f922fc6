//! Context retention across turns and adaptation to learned preferences.

use serde_json::Value;

use crate::conversation::ConversationTurn;
use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};
use crate::preferences::PreferenceFlags;

/// Does the reply remember what the conversation already established?
///
/// Scans prior user messages for cities, preference topics, and day
/// mentions, then checks whether the reply carries them forward.
pub(crate) fn evaluate_context_retention(
    query: &str,
    response: &str,
    history: Option<&[ConversationTurn]>,
) -> MetricResult {
    let Some(history) = history.filter(|turns| !turns.is_empty()) else {
        return MetricResult::new(
            0.5,
            "No conversation history available for context retention evaluation",
            MetricData::Retention {
                retained_items: Vec::new(),
            },
        );
    };

    let mut score = 0.5;
    let mut retained_items = Vec::new();
    let response_lower = response.to_lowercase();
    let query_lower = query.to_lowercase();

    // Entities previously established by the user.
    let mut mentioned_cities: Vec<String> = Vec::new();
    let mut mentioned_preference_topics: Vec<&str> = Vec::new();
    let mut mentioned_days: Vec<&str> = Vec::new();

    for turn in history {
        let user_msg = turn.user.to_lowercase();

        for city in signals::extract_cities(&user_msg) {
            if !mentioned_cities.contains(&city) {
                mentioned_cities.push(city);
            }
        }

        if signals::contains_any(&user_msg, signals::PREFERENCE_SIGNAL_WORDS) {
            if user_msg.contains("cold") || user_msg.contains("warm") {
                push_unique(&mut mentioned_preference_topics, "temperature_preference");
            }
            if user_msg.contains("rain") || user_msg.contains("sunny") {
                push_unique(&mut mentioned_preference_topics, "weather_preference");
            }
            if user_msg.contains("outdoor") || user_msg.contains("indoor") {
                push_unique(&mut mentioned_preference_topics, "activity_preference");
            }
        }

        for day in signals::DAY_TOKENS {
            if user_msg.contains(day) {
                push_unique(&mut mentioned_days, day);
            }
        }
    }

    if !mentioned_cities.is_empty() {
        if mentioned_cities.iter().any(|city| response_lower.contains(city.as_str())) {
            score += 0.2;
            retained_items.push("city".to_string());
        } else if mentioned_cities.iter().any(|city| query_lower.contains(city.as_str())) {
            // The query named a known city and the reply dropped it.
            score -= 0.1;
        }
    }

    if !mentioned_preference_topics.is_empty() {
        let has_pref_keywords = response_lower.contains("prefer")
            || response_lower.contains("like")
            || response_lower.contains("recommend");
        let has_pref_context = response_lower.contains("temperature")
            || response_lower.contains("weather")
            || response_lower.contains("outdoor")
            || response_lower.contains("indoor");
        if has_pref_keywords && has_pref_context {
            score += 0.15;
            retained_items.push("preferences".to_string());
        }
    }

    if !mentioned_days.is_empty()
        && mentioned_days.iter().any(|day| response_lower.contains(day))
    {
        score += 0.15;
        retained_items.push("date/time".to_string());
    }

    let details = if retained_items.is_empty() {
        "Limited context retention detected".to_string()
    } else {
        format!(
            "Retained {} context item(s): {}",
            retained_items.len(),
            retained_items.join(", ")
        )
    };

    MetricResult::new(score, details, MetricData::Retention { retained_items })
}

fn push_unique<'a>(items: &mut Vec<&'a str>, item: &'a str) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Does the reply adjust to what the system has learned about the user?
pub(crate) fn evaluate_adaptation_quality(
    response: &str,
    preferences: Option<&Value>,
) -> MetricResult {
    let Some(preferences) = preferences else {
        return MetricResult::new(
            0.5,
            "No user preferences available for adaptation evaluation",
            MetricData::Adaptations {
                adaptations_detected: Vec::new(),
            },
        );
    };

    let flags = PreferenceFlags::from_value(preferences);
    if !flags.has_learned() {
        return MetricResult::new(
            0.5,
            "No learned preferences available",
            MetricData::Adaptations {
                adaptations_detected: Vec::new(),
            },
        );
    }

    let mut score = 0.5;
    let mut adaptations_detected = Vec::new();
    let response_lower = response.to_lowercase();

    // A disliked condition must be both named and counter-acted by the
    // matching mitigation language.
    if flags.dislikes_cold
        && signals::contains_any(&response_lower, &["warm", "warmer", "jacket", "coat", "layers"])
        && (response_lower.contains("cold") || response_lower.contains("freezing"))
    {
        score += 0.15;
        adaptations_detected.push("cold_weather_adaptation".to_string());
    }

    if flags.dislikes_rain
        && (response_lower.contains("rain") || response_lower.contains("rainy"))
        && (response_lower.contains("umbrella") || response_lower.contains("indoor"))
    {
        score += 0.15;
        adaptations_detected.push("rain_adaptation".to_string());
    }

    if flags.prefers_indoor {
        if response_lower.contains("indoor") && !response_lower.contains("outdoor") {
            score += 0.15;
            adaptations_detected.push("indoor_preference_adaptation".to_string());
        }
    } else if flags.outdoor_activities && response_lower.contains("outdoor") {
        score += 0.15;
        adaptations_detected.push("outdoor_preference_adaptation".to_string());
    }

    if flags.dislikes_heat
        && signals::contains_any(&response_lower, &["cool", "shade", "indoor", "air conditioning"])
    {
        score += 0.1;
        adaptations_detected.push("heat_adaptation".to_string());
    }

    if signals::contains_any(
        &response_lower,
        &["prefer", "preference", "remember", "based on", "considering"],
    ) {
        score += 0.1;
        adaptations_detected.push("preference_awareness".to_string());
    }

    let details = if adaptations_detected.is_empty() {
        "Limited adaptation to user preferences".to_string()
    } else {
        format!("Detected {} adaptation(s)", adaptations_detected.len())
    };

    MetricResult::new(score, details, MetricData::Adaptations { adaptations_detected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history(turns: &[(&str, &str)]) -> Vec<ConversationTurn> {
        turns
            .iter()
            .map(|(user, assistant)| ConversationTurn::new(*user, *assistant))
            .collect()
    }

    #[test]
    fn test_no_history_is_neutral() {
        let result = evaluate_context_retention("weather?", "It's sunny.", None);
        assert_eq!(result.score, 0.5);
        let empty = history(&[]);
        let result = evaluate_context_retention("weather?", "It's sunny.", Some(&empty));
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_city_carried_forward() {
        let turns = history(&[("What's the weather in Helsinki?", "It's 3°C in Helsinki.")]);
        let result = evaluate_context_retention(
            "And tomorrow?",
            "Helsinki will warm up to 6°C tomorrow.",
            Some(&turns),
        );
        assert_eq!(result.score, 0.7);
        let MetricData::Retention { retained_items } = &result.data else {
            panic!("wrong data shape");
        };
        assert_eq!(retained_items, &["city"]);
    }

    #[test]
    fn test_known_city_in_query_ignored_by_reply() {
        let turns = history(&[("Weather in Oslo please", "Rainy in Oslo.")]);
        let result = evaluate_context_retention(
            "Is Oslo still rainy?",
            "It is rainy.",
            Some(&turns),
        );
        assert_eq!(result.score, 0.4);
    }

    #[test]
    fn test_preference_topic_and_day_retained() {
        let turns = history(&[(
            "I really dislike cold mornings, especially on monday",
            "Noted.",
        )]);
        let result = evaluate_context_retention(
            "Anything I should know?",
            "Since you'd like milder weather, monday looks fine.",
            Some(&turns),
        );
        // 0.5 + 0.15 (preferences) + 0.15 (day token).
        assert_eq!(result.score, 0.8);
    }

    #[test]
    fn test_no_preference_state_is_neutral() {
        let result = evaluate_adaptation_quality("Dress warmly, it's cold.", None);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_nothing_learned_caps_at_neutral() {
        let prefs = json!({
            "temperature_preferences": {"dislikes_cold": true},
            "weather_preferences": {"dislikes_rain": true, "prefers_indoor": true},
            "learned_from_conversations": 0
        });
        let result = evaluate_adaptation_quality(
            "It's cold and rainy; stay warm indoors, bring an umbrella, based on your preferences.",
            Some(&prefs),
        );
        assert_eq!(result.score, 0.5);
        assert_eq!(result.details, "No learned preferences available");
    }

    #[test]
    fn test_cold_and_rain_adaptations_stack() {
        let prefs = json!({
            "temperature_preferences": {"dislikes_cold": true},
            "weather_preferences": {"dislikes_rain": true},
            "learned_from_conversations": 4
        });
        let result = evaluate_adaptation_quality(
            "It's cold with rain on the way; wear a warm jacket and pack an umbrella.",
            Some(&prefs),
        );
        // 0.5 + cold 0.15 + rain 0.15.
        assert_eq!(result.score, 0.8);
        let MetricData::Adaptations { adaptations_detected } = &result.data else {
            panic!("wrong data shape");
        };
        assert_eq!(
            adaptations_detected,
            &["cold_weather_adaptation", "rain_adaptation"]
        );
    }

    #[test]
    fn test_preference_awareness_phrasing() {
        let prefs = json!({
            "weather_conditions": {"dislikes_rain": true},
            "learned_from_conversations": 2
        });
        let result = evaluate_adaptation_quality(
            "Based on what you've told me, today should suit you.",
            Some(&prefs),
        );
        assert_eq!(result.score, 0.6);
    }
}
