//! Ground-truth weather payload adapter.
//!
//! Weather-data clients hand the evaluator a loose JSON payload that may be
//! shaped as current conditions, a multi-day forecast, or both at once. The
//! shape is detected by presence of characteristic keys (`current`,
//! `daily_summaries`, `detailed_forecast`); unrecognized or malformed parts
//! degrade to "not detected" instead of failing evaluation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current observed conditions for a location.
///
/// All fields are optional because upstream providers omit them freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Dominant condition category (e.g. "rain", "clear", "clouds").
    #[serde(alias = "main_condition")]
    pub condition: Option<String>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
}

/// One day of a forecast outlook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date label for the day.
    #[serde(default)]
    pub date: Option<String>,
    /// Minimum forecast temperature in degrees Celsius.
    #[serde(default)]
    pub min_temp: Option<f64>,
    /// Maximum forecast temperature in degrees Celsius.
    #[serde(default)]
    pub max_temp: Option<f64>,
    /// Dominant condition category for the day.
    #[serde(alias = "condition", default)]
    pub main_condition: Option<String>,
    /// Highest precipitation probability across the day, in percent.
    #[serde(alias = "precipitation_probability", default)]
    pub max_precipitation_probability: Option<f64>,
}

/// Which shapes were recognized in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotShape {
    /// Only current conditions present.
    Current,
    /// Only forecast data present.
    Forecast,
    /// Both current conditions and forecast data present.
    Combined,
    /// No recognized weather keys.
    Unrecognized,
}

/// Typed view over a ground-truth weather payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current conditions, when the payload carried a `current` record.
    pub current: Option<CurrentConditions>,
    /// Per-day forecast summaries, when the payload carried a forecast shape.
    pub outlook: Option<Vec<DailySummary>>,
}

impl WeatherSnapshot {
    /// Detect and extract the recognized shapes from a loose payload.
    pub fn from_value(value: &Value) -> Self {
        let current = value
            .get("current")
            .and_then(|c| serde_json::from_value::<CurrentConditions>(c.clone()).ok());

        // `daily_summaries` is the summarized outlook; some payloads only
        // carry the raw `detailed_forecast` grouping, which still marks the
        // payload as forecast-shaped even when its days don't parse.
        let outlook = match value.get("daily_summaries").and_then(Value::as_array) {
            Some(days) => Some(
                days.iter()
                    .filter_map(|d| serde_json::from_value::<DailySummary>(d.clone()).ok())
                    .collect(),
            ),
            None => value.get("detailed_forecast").map(|_| Vec::new()),
        };

        Self { current, outlook }
    }

    /// Classify which shapes were recognized.
    pub fn shape(&self) -> SnapshotShape {
        match (self.current.is_some(), self.outlook.is_some()) {
            (true, true) => SnapshotShape::Combined,
            (true, false) => SnapshotShape::Current,
            (false, true) => SnapshotShape::Forecast,
            (false, false) => SnapshotShape::Unrecognized,
        }
    }

    /// Whether the payload carried any forecast-shaped data.
    pub fn has_forecast(&self) -> bool {
        self.outlook.is_some()
    }
}

/// Whether a collaborator actually delivered weather content.
///
/// Callers sometimes pass an empty object where they mean "nothing was
/// fetched"; that counts as absent for scoring purposes.
pub fn has_payload(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_shape_detected() {
        let payload = json!({
            "current": {"temperature": 10.0, "main_condition": "rain", "humidity": 80, "wind_speed": 4.2}
        });
        let snapshot = WeatherSnapshot::from_value(&payload);
        assert_eq!(snapshot.shape(), SnapshotShape::Current);
        let current = snapshot.current.unwrap();
        assert_eq!(current.temperature, Some(10.0));
        assert_eq!(current.condition.as_deref(), Some("rain"));
    }

    #[test]
    fn test_forecast_shape_detected() {
        let payload = json!({
            "daily_summaries": [
                {"date": "2025-06-02", "min_temp": 8.0, "max_temp": 14.0,
                 "main_condition": "clouds", "max_precipitation_probability": 40.0}
            ]
        });
        let snapshot = WeatherSnapshot::from_value(&payload);
        assert_eq!(snapshot.shape(), SnapshotShape::Forecast);
        assert_eq!(snapshot.outlook.unwrap().len(), 1);
    }

    #[test]
    fn test_combined_payload_keeps_both_parts() {
        let payload = json!({
            "current": {"temperature": 21.5},
            "daily_summaries": []
        });
        let snapshot = WeatherSnapshot::from_value(&payload);
        assert_eq!(snapshot.shape(), SnapshotShape::Combined);
    }

    #[test]
    fn test_detailed_forecast_alone_counts_as_forecast() {
        let payload = json!({"detailed_forecast": {"2025-06-02": []}});
        let snapshot = WeatherSnapshot::from_value(&payload);
        assert!(snapshot.has_forecast());
    }

    #[test]
    fn test_malformed_payload_degrades_to_unrecognized() {
        let snapshot = WeatherSnapshot::from_value(&json!({"something_else": 1}));
        assert_eq!(snapshot.shape(), SnapshotShape::Unrecognized);
    }

    #[test]
    fn test_empty_object_has_no_payload() {
        assert!(!has_payload(&json!({})));
        assert!(!has_payload(&Value::Null));
        assert!(has_payload(&json!({"current": {}})));
    }
}
