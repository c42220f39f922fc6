//! Ambiguity handling and answer repeatability.

use crate::conversation::ConversationTurn;
use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};

/// Words shorter than this don't count as query keywords.
const KEYWORD_MIN_LEN: usize = 4;
/// Two prior-query keywords in common marks a turn as similar.
const SIMILARITY_THRESHOLD: usize = 2;

/// A query is ambiguous when any of these holds: it names no location, asks
/// a time question without a resolved date, is very short without weather
/// vocabulary, or carries no weather-domain keyword at all.
fn ambiguity_triggers(query_lower: &str, word_count: usize) -> (bool, bool, bool, bool) {
    let missing_location = !signals::contains_any(
        query_lower,
        &["in ", "at ", "for ", "weather", "city", "location", "place"],
    );
    let missing_time = signals::contains_any(query_lower, &["when", "what time", "when is"])
        && !signals::contains_any(query_lower, &["today", "tomorrow", "friday", "monday", "next"]);
    let vague_request = word_count < 4
        && !signals::contains_any(query_lower, &["weather", "temperature", "forecast"]);
    let unclear_intent = !signals::contains_any(
        query_lower,
        &[
            "weather", "temp", "forecast", "rain", "sunny", "cold", "hot", "umbrella", "jacket",
            "activity", "plan",
        ],
    );
    (missing_location, missing_time, vague_request, unclear_intent)
}

/// How well does the reply manage vague or incomplete input?
pub(crate) fn evaluate_ambiguity_handling(query: &str, response: &str) -> MetricResult {
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();
    let response_len = response.chars().count();
    let mut score: f64 = 0.5;
    let mut strengths = Vec::new();
    let mut issues = Vec::new();

    let (missing_location, missing_time, vague_request, unclear_intent) =
        ambiguity_triggers(&query_lower, query.split_whitespace().count());
    let is_ambiguous = missing_location || missing_time || vague_request || unclear_intent;

    if is_ambiguous {
        if signals::contains_any(&response_lower, signals::AMBIGUITY_CLARIFICATION_PHRASES) {
            strengths.push("Asks for clarification when input is vague".to_string());
            score += 0.4;
        } else if signals::contains_any(&response_lower, signals::ASSUMPTION_INDICATORS) {
            strengths.push("Makes reasonable assumptions when information is missing".to_string());
            score += 0.3;
        } else if response_len > 100
            && signals::contains_any(
                &response_lower,
                &["weather", "temperature", "forecast", "recommend"],
            )
        {
            strengths.push("Provides helpful response despite ambiguity".to_string());
            score += 0.2;
        } else {
            issues.push("Does not handle ambiguous input well".to_string());
            score -= 0.2;
        }
    } else if response_len > 50
        && signals::contains_any(
            &response_lower,
            &["weather", "temperature", "forecast", "recommend"],
        )
    {
        strengths.push("Handles clear queries appropriately".to_string());
        score += 0.2;
    }

    if missing_location {
        if signals::contains_any(&response_lower, signals::LOCATION_REQUEST_PHRASES) {
            strengths.push("Asks for missing location information".to_string());
            score += 0.2;
        } else if !is_ambiguous {
            issues.push("Does not request missing location".to_string());
            score -= 0.1;
        }
    }

    if is_ambiguous && signals::contains_any(&response_lower, signals::GUIDANCE_PHRASES) {
        strengths.push("Provides helpful guidance for unclear input".to_string());
        score += 0.2;
    }

    let mut score = score.clamp(0.0, 1.0);
    let details = if !strengths.is_empty() && issues.is_empty() {
        format!("Good handling: {}", join_first_two(&strengths))
    } else if !issues.is_empty() {
        format!("Issues: {}", join_first_two(&issues))
    } else if !is_ambiguous {
        score = score.max(0.8);
        "Query was clear, handled appropriately".to_string()
    } else {
        "Basic ambiguity handling".to_string()
    };

    MetricResult::new(
        score,
        details,
        MetricData::Ambiguity {
            strengths,
            issues,
            is_ambiguous,
        },
    )
}

/// Would a repeat of this query plausibly get the same answer?
///
/// With similar prior turns on record, structural overlap (temperature
/// mentions, recommendation language, named items) replaces the default
/// consistency assumption; hedging language and extreme lengths always
/// cost a little.
pub(crate) fn evaluate_repeatability(
    query: &str,
    response: &str,
    history: Option<&[ConversationTurn]>,
) -> MetricResult {
    let response_lower = response.to_lowercase();
    let response_len = response.chars().count();
    let mut score: f64 = 0.7;
    let mut strengths = Vec::new();
    let mut issues = Vec::new();

    let history = history.filter(|turns| !turns.is_empty());
    if let Some(turns) = history {
        let current_keywords = query_keywords(query);

        let similar_responses: Vec<String> = turns
            .iter()
            .filter(|turn| {
                let prev_keywords = query_keywords(&turn.user);
                let common = prev_keywords
                    .iter()
                    .filter(|word| current_keywords.contains(*word))
                    .count();
                common >= SIMILARITY_THRESHOLD
            })
            .map(|turn| turn.assistant.to_lowercase())
            .collect();

        if !similar_responses.is_empty() {
            let prior_temp = similar_responses
                .iter()
                .any(|r| r.contains("temperature") || r.contains("degrees"));
            let prior_recs = similar_responses
                .iter()
                .any(|r| signals::contains_any(r, &["recommend", "suggest", "should"]));
            let prior_items = similar_responses
                .iter()
                .any(|r| signals::contains_any(r, &["umbrella", "jacket", "wear"]));

            let has_temp =
                response_lower.contains("temperature") || response_lower.contains("degrees");
            let has_recs =
                signals::contains_any(&response_lower, &["recommend", "suggest", "should"]);
            let has_items =
                signals::contains_any(&response_lower, &["umbrella", "jacket", "wear"]);

            let mut consistency: f64 = 0.0;
            if prior_temp && has_temp {
                consistency += 0.3;
                strengths.push("Consistent temperature information".to_string());
            }
            if prior_recs && has_recs {
                consistency += 0.3;
                strengths.push("Consistent recommendation style".to_string());
            }
            if prior_items && has_items {
                consistency += 0.2;
                strengths.push("Consistent item suggestions".to_string());
            }

            if consistency > 0.0 {
                // Structural overlap replaces the default assumption.
                score = 0.5 + consistency;
            } else {
                issues.push("Inconsistent with previous similar queries".to_string());
                score -= 0.2;
            }
        }
    } else if signals::contains_any(
        &response_lower,
        &["weather", "temperature", "forecast", "recommend"],
    ) {
        strengths.push("Structured response format".to_string());
        score += 0.1;
    }

    if signals::contains_any(&response_lower, signals::NONDETERMINISM_INDICATORS) {
        issues.push("Contains non-deterministic language".to_string());
        score -= 0.1;
    }

    if response_len < 30 {
        issues.push("Very short response (potential instability)".to_string());
        score -= 0.1;
    } else if response_len > 1000 {
        issues.push("Very long response (potential inconsistency)".to_string());
        score -= 0.05;
    }

    let details = if !strengths.is_empty() && issues.is_empty() {
        format!("Good consistency: {}", join_first_two(&strengths))
    } else if !issues.is_empty() {
        format!("Consistency issues: {}", join_first_two(&issues))
    } else if history.is_some() {
        "Consistent with conversation history".to_string()
    } else {
        "No history to compare, appears stable".to_string()
    };

    MetricResult::new(score, details, MetricData::Diagnostics { strengths, issues })
}

fn query_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        if word.chars().count() > KEYWORD_MIN_LEN - 1 {
            let lowered = word.to_lowercase();
            if !keywords.contains(&lowered) {
                keywords.push(lowered);
            }
        }
    }
    keywords
}

fn join_first_two(items: &[String]) -> String {
    items
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
