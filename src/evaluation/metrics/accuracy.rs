//! Factual accuracy against the ground-truth weather snapshot.

use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};
use crate::weather::WeatherSnapshot;

/// Temperature differences above this many °C are a hard mismatch.
const TEMP_HARD_TOLERANCE: f64 = 2.0;
/// Differences above this but within the hard tolerance are "slightly off".
const TEMP_SOFT_TOLERANCE: f64 = 1.0;

/// Compare the response's factual claims against the weather snapshot.
///
/// Starts from a perfect score and subtracts a penalty per detected issue;
/// without ground truth there is nothing to compare, so the score is the
/// neutral 0.5.
pub(crate) fn evaluate_accuracy(
    query: &str,
    response: &str,
    weather: Option<&WeatherSnapshot>,
) -> MetricResult {
    let Some(snapshot) = weather else {
        return MetricResult::new(
            0.5,
            "No weather data available for comparison",
            MetricData::Accuracy {
                factual_errors: Vec::new(),
            },
        );
    };

    let mut score = 1.0;
    let mut factual_errors = Vec::new();
    let response_lower = response.to_lowercase();
    let query_lower = query.to_lowercase();

    if let Some(current) = &snapshot.current {
        // Temperature claim, first matching pattern wins.
        if let (Some(actual), Some(claimed)) = (
            current.temperature,
            signals::extract_temperature(&response_lower),
        ) {
            let diff = (claimed - actual).abs();
            if diff > TEMP_HARD_TOLERANCE {
                score -= 0.3;
                factual_errors.push(format!(
                    "Temperature mismatch: said {claimed}°C, actual {actual}°C"
                ));
            } else if diff > TEMP_SOFT_TOLERANCE {
                score -= 0.1;
                factual_errors.push(format!(
                    "Temperature slightly off: said {claimed}°C, actual {actual}°C"
                ));
            }
        }

        // Condition category must be mentioned by at least one synonym.
        if let Some(condition) = current.condition.as_deref() {
            let condition = condition.to_lowercase();
            if let Some(synonyms) = signals::condition_synonyms(&condition) {
                if !signals::contains_any(&response_lower, synonyms) {
                    score -= 0.2;
                    factual_errors.push(format!(
                        "Missing weather condition: should mention {condition}"
                    ));
                }
            }
        }
    }

    // A forecast-intent query against forecast-shaped data must be
    // acknowledged by at least one forecast keyword in the reply.
    if snapshot.has_forecast()
        && signals::contains_any(&query_lower, signals::FORECAST_KEYWORDS)
        && !signals::contains_any(&response_lower, signals::FORECAST_KEYWORDS)
    {
        score -= 0.2;
        factual_errors.push("Forecast query not addressed".to_string());
    }

    let details = if factual_errors.is_empty() {
        "No factual errors detected".to_string()
    } else {
        format!("{} factual issue(s) found", factual_errors.len())
    };

    MetricResult::new(score, details, MetricData::Accuracy { factual_errors })
}
