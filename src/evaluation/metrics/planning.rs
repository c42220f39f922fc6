//! Action planning and error recovery.

use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};

/// Did the agent take sensible actions in a sensible order?
///
/// The "weather info before recommendations" check compares first-occurrence
/// byte offsets of probe tokens. That is a rough proxy for discourse order,
/// not real parsing; a probe match at offset 0 counts as found.
pub(crate) fn evaluate_action_planning(
    query: &str,
    response: &str,
    weather_available: bool,
    tool_call_count: Option<u32>,
) -> MetricResult {
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();
    let mut score: f64 = 0.0;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    let is_weather_query =
        signals::contains_any(&query_lower, signals::PLANNING_WEATHER_KEYWORDS);

    if is_weather_query {
        if weather_available {
            strengths.push("Weather data retrieved appropriately".to_string());
            score += 0.3;
        } else if signals::contains_any(&response_lower, signals::PLANNING_MISSING_DATA_PHRASES) {
            strengths.push("Acknowledged missing weather data".to_string());
            score += 0.15;
        } else {
            issues.push("Weather query but no weather data used".to_string());
        }

        let has_weather_info =
            signals::contains_any(&response_lower, signals::WEATHER_INFO_TOKENS);
        let has_recommendations =
            signals::contains_any(&response_lower, signals::PLANNING_RECOMMENDATION_TOKENS);

        if has_weather_info && has_recommendations {
            let weather_pos =
                signals::first_occurrence(&response_lower, signals::WEATHER_POSITION_PROBES);
            let rec_pos =
                signals::first_occurrence(&response_lower, signals::RECOMMENDATION_POSITION_PROBES);
            match (weather_pos, rec_pos) {
                (Some(w), Some(r)) if r > w => {
                    strengths
                        .push("Logical sequence: weather info before recommendations".to_string());
                    score += 0.3;
                }
                _ => {
                    strengths
                        .push("Both weather info and recommendations present".to_string());
                    score += 0.2;
                }
            }
        } else if has_weather_info {
            strengths.push("Weather information provided".to_string());
            score += 0.2;
        } else if has_recommendations && !weather_available {
            issues.push("Recommendations without weather data".to_string());
        }
    }

    if let Some(count) = tool_call_count {
        if is_weather_query {
            if count > 0 {
                strengths.push("Appropriate tool usage for weather query".to_string());
                score += 0.2;
            } else {
                issues.push("No tool calls for weather query".to_string());
            }
        } else if count == 0 {
            strengths.push("No unnecessary tool calls".to_string());
            score += 0.1;
        }
    }

    if signals::contains_any(&response_lower, signals::FLOW_INDICATORS) {
        strengths.push("Response shows logical flow".to_string());
        score += 0.1;
    }

    let mut score = score.min(1.0);
    if issues.is_empty() && !strengths.is_empty() {
        score = score.max(0.8);
    }

    let details = if !strengths.is_empty() && issues.is_empty() {
        format!("Good planning: {}", join_first_two(&strengths))
    } else if !issues.is_empty() {
        format!("Issues: {}", join_first_two(&issues))
    } else {
        "Basic planning observed".to_string()
    };

    MetricResult::new(score, details, MetricData::Diagnostics { strengths, issues })
}

/// Did the agent cope well with errors, missing data, and vagueness?
pub(crate) fn evaluate_error_recovery(
    query: &str,
    response: &str,
    weather_missing: bool,
    weather_available: bool,
) -> MetricResult {
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();
    let mut score: f64 = 0.5;
    let mut strengths = Vec::new();
    let mut issues = Vec::new();

    let has_error_indicators = signals::contains_any(&response_lower, signals::ERROR_INDICATORS);

    if has_error_indicators {
        if signals::contains_any(&response_lower, signals::GRACEFUL_INDICATORS) {
            strengths.push("Error handled with alternatives".to_string());
            score += 0.3;
        } else if response.chars().count() > 50 {
            strengths.push("Detailed error explanation".to_string());
            score += 0.2;
        } else {
            issues.push("Brief error message without alternatives".to_string());
            score -= 0.2;
        }
    }

    if weather_missing {
        if signals::contains_any(&response_lower, signals::MISSING_DATA_PHRASES) {
            strengths.push("Acknowledged missing data".to_string());
            score += 0.2;

            // Seasonal/typical advice still helps when live data is gone.
            if signals::contains_any(&response_lower, signals::GENERIC_ADVICE_PHRASES) {
                strengths.push("Provided alternatives despite missing data".to_string());
                score += 0.3;
            }
        } else if signals::contains_any(
            &query_lower,
            &["weather", "temperature", "forecast", "rain", "sunny"],
        ) {
            issues.push("Missing weather data not acknowledged".to_string());
            score -= 0.2;
        }
    }

    if signals::contains_any(&response_lower, signals::CLARIFICATION_REQUEST_PHRASES) {
        strengths.push("Asks for clarification when needed".to_string());
        score += 0.2;
    }

    if has_error_indicators
        && signals::contains_any(&response_lower, signals::FALLBACK_INDICATORS)
    {
        strengths.push("Provides fallback options".to_string());
        score += 0.2;
    }

    let mut score = score.clamp(0.0, 1.0);
    let details = if !strengths.is_empty() && issues.is_empty() {
        format!("Good recovery: {}", join_first_two(&strengths))
    } else if !issues.is_empty() {
        format!("Recovery issues: {}", join_first_two(&issues))
    } else if !has_error_indicators && weather_available {
        // Clean run: nothing went wrong and the data was there.
        score = 1.0;
        "No errors encountered".to_string()
    } else {
        "Basic error handling".to_string()
    };

    MetricResult::new(score, details, MetricData::Diagnostics { strengths, issues })
}

fn join_first_two(items: &[String]) -> String {
    items
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
