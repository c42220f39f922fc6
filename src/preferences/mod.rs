//! Learned user-preference normalization.
//!
//! Two preference-store generations are in the field: a grouped-topic layout
//! (`temperature_preferences` / `weather_preferences` / `activity_preferences`)
//! and a flat conditions layout (`weather_conditions` plus a slimmer
//! `activity_preferences`). Both describe the same semantic flags, so they are
//! normalized into one canonical [`PreferenceFlags`] record before any scoring
//! logic runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical learned-preference flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceFlags {
    /// User dislikes cold weather.
    pub dislikes_cold: bool,
    /// User dislikes hot weather.
    pub dislikes_heat: bool,
    /// User dislikes rain.
    pub dislikes_rain: bool,
    /// User dislikes wind.
    pub dislikes_wind: bool,
    /// User prefers sunny weather.
    pub prefers_sunny: bool,
    /// User prefers indoor activities.
    pub prefers_indoor: bool,
    /// User enjoys outdoor activities.
    pub outdoor_activities: bool,
    /// How many conversation turns have contributed to these flags.
    pub learned_count: u64,
}

fn flag(value: &Value, group: &str, key: &str) -> bool {
    value
        .get(group)
        .and_then(|g| g.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

impl PreferenceFlags {
    /// Normalize a raw preference payload from either known schema.
    ///
    /// Unrecognized keys are ignored; a payload matching neither schema
    /// yields all-false flags and a learned count of zero.
    pub fn from_value(value: &Value) -> Self {
        let mut flags = Self::default();

        // Grouped-topic layout.
        flags.dislikes_cold |= flag(value, "temperature_preferences", "dislikes_cold");
        flags.dislikes_heat |= flag(value, "temperature_preferences", "dislikes_heat");
        flags.dislikes_rain |= flag(value, "weather_preferences", "dislikes_rain");
        flags.dislikes_wind |= flag(value, "weather_preferences", "dislikes_wind");
        flags.prefers_sunny |= flag(value, "weather_preferences", "prefers_sunny");
        flags.prefers_indoor |= flag(value, "weather_preferences", "prefers_indoor");
        flags.outdoor_activities |= flag(value, "activity_preferences", "outdoor_activities");

        // Flat conditions layout.
        flags.dislikes_cold |= flag(value, "weather_conditions", "dislikes_cold");
        flags.dislikes_rain |= flag(value, "weather_conditions", "dislikes_rain");
        flags.dislikes_wind |= flag(value, "weather_conditions", "dislikes_wind");
        flags.prefers_sunny |= flag(value, "weather_conditions", "prefers_sunny");
        flags.prefers_indoor |= flag(value, "activity_preferences", "prefers_indoor");

        flags.learned_count = value
            .get("learned_from_conversations")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        flags
    }

    /// Whether anything has been learned yet.
    pub fn has_learned(&self) -> bool {
        self.learned_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grouped_topic_schema_normalizes() {
        let payload = json!({
            "temperature_preferences": {"dislikes_cold": true, "dislikes_heat": false},
            "weather_preferences": {"dislikes_rain": true, "prefers_indoor": true},
            "activity_preferences": {"outdoor_activities": true},
            "learned_from_conversations": 3
        });
        let flags = PreferenceFlags::from_value(&payload);
        assert!(flags.dislikes_cold);
        assert!(!flags.dislikes_heat);
        assert!(flags.dislikes_rain);
        assert!(flags.prefers_indoor);
        assert!(flags.outdoor_activities);
        assert_eq!(flags.learned_count, 3);
    }

    #[test]
    fn test_flat_conditions_schema_normalizes() {
        let payload = json!({
            "weather_conditions": {"dislikes_cold": true, "dislikes_rain": true, "prefers_sunny": true},
            "activity_preferences": {"prefers_indoor": true},
            "learned_from_conversations": 1
        });
        let flags = PreferenceFlags::from_value(&payload);
        assert!(flags.dislikes_cold);
        assert!(flags.dislikes_rain);
        assert!(flags.prefers_sunny);
        assert!(flags.prefers_indoor);
        assert!(flags.has_learned());
    }

    #[test]
    fn test_unrecognized_schema_degrades_to_defaults() {
        let flags = PreferenceFlags::from_value(&json!({"favorite_color": "blue"}));
        assert_eq!(flags, PreferenceFlags::default());
        assert!(!flags.has_learned());
    }
}
