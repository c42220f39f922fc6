//! Task completion and recommendation quality.

use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};

/// Character count below which an apologetic reply is treated as a bare
/// error message.
const SHORT_ERROR_LEN: usize = 100;
/// Character count below which a reply counts as empty.
const NEAR_EMPTY_LEN: usize = 20;
/// A score at or above this marks the task as completed.
const COMPLETED_THRESHOLD: f64 = 0.7;

/// Did the reply actually do what the query asked?
pub(crate) fn evaluate_task_completion(query: &str, response: &str) -> MetricResult {
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();
    let response_len = response.chars().count();

    let has_error = signals::contains_any(&response_lower, signals::ERROR_INDICATORS);
    if has_error && response_len < SHORT_ERROR_LEN {
        return MetricResult::new(
            0.2,
            "Error message detected",
            MetricData::Completion { completed: false },
        );
    }

    if response.trim().chars().count() < NEAR_EMPTY_LEN {
        return MetricResult::new(
            0.1,
            "Response too short or empty",
            MetricData::Completion { completed: false },
        );
    }

    // A weather-flavored query answered without any weather vocabulary is a
    // miss no matter how elaborate the reply is.
    let query_is_weather = signals::contains_any(&query_lower, signals::WEATHER_KEYWORDS);
    if query_is_weather && !signals::contains_any(&response_lower, signals::WEATHER_KEYWORDS) {
        return MetricResult::new(
            0.4,
            "Weather query not properly addressed",
            MetricData::Completion { completed: false },
        );
    }

    let mut score = 0.5;
    if signals::has_digit(response) {
        score += 0.2;
    }
    if signals::contains_any(&response_lower, signals::COMPLETION_RECOMMENDATION_KEYWORDS) {
        score += 0.2;
    }
    if response_len > 100 {
        score += 0.1;
    }

    let completed = score >= COMPLETED_THRESHOLD;
    MetricResult::new(
        score,
        if completed {
            "Task completed"
        } else {
            "Task partially completed"
        },
        MetricData::Completion { completed },
    )
}

/// How useful are the reply's recommendations, if any?
pub(crate) fn evaluate_recommendation_quality(query: &str, response: &str) -> MetricResult {
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();

    let has_recommendations =
        signals::contains_any(&response_lower, signals::RECOMMENDATION_KEYWORDS);

    if !has_recommendations {
        return if signals::contains_any(&query_lower, signals::ASKS_FOR_RECOMMENDATION) {
            MetricResult::new(
                0.2,
                "Recommendations requested but not provided",
                MetricData::Recommendations {
                    has_recommendations: false,
                    recommendation_count: 0,
                },
            )
        } else {
            MetricResult::new(
                0.5,
                "No recommendations needed for this query",
                MetricData::Recommendations {
                    has_recommendations: false,
                    recommendation_count: 0,
                },
            )
        };
    }

    let mut score = 0.5;
    if signals::contains_any(&response_lower, signals::SPECIFIC_ITEMS) {
        score += 0.2;
    }
    if signals::contains_any(&response_lower, signals::REASONING_KEYWORDS) {
        score += 0.2;
    }
    let recommendation_count =
        signals::count_matches(&response_lower, signals::RECOMMENDATION_KEYWORDS);
    if recommendation_count >= 3 {
        score += 0.1;
    }

    let details = if score >= 0.8 {
        format!("High quality recommendations with {recommendation_count} suggestions")
    } else {
        "Basic recommendations provided".to_string()
    };

    MetricResult::new(
        score,
        details,
        MetricData::Recommendations {
            has_recommendations: true,
            recommendation_count,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_apology_is_an_error() {
        let result = evaluate_task_completion("weather?", "Sorry, I couldn't get that.");
        assert_eq!(result.score, 0.2);
        assert_eq!(result.data, MetricData::Completion { completed: false });
    }

    #[test]
    fn test_near_empty_response() {
        let result = evaluate_task_completion("weather?", "ok");
        assert_eq!(result.score, 0.1);
    }

    #[test]
    fn test_weather_query_without_weather_vocabulary() {
        let result = evaluate_task_completion(
            "what's the weather like?",
            "I had a great day at the office and finished all my chores early.",
        );
        assert_eq!(result.score, 0.4);
    }

    #[test]
    fn test_substantial_answer_completes_the_task() {
        let result = evaluate_task_completion(
            "what's the weather in oslo?",
            "It's currently 12°C in Oslo with light rain. I suggest you bring an umbrella \
             and wear a waterproof jacket if you're heading out this afternoon.",
        );
        assert_eq!(result.score, 1.0);
        assert_eq!(result.data, MetricData::Completion { completed: true });
    }

    #[test]
    fn test_no_recommendations_when_none_requested() {
        let result = evaluate_recommendation_quality("tell me a story", "Once upon a time it was warm.");
        assert_eq!(result.score, 0.5);
        assert_eq!(result.details, "No recommendations needed for this query");
    }

    #[test]
    fn test_requested_but_missing_recommendations() {
        let result = evaluate_recommendation_quality("what should I do today?", "The day is young.");
        assert_eq!(result.score, 0.2);
    }

    #[test]
    fn test_specific_reasoned_recommendations_score_high() {
        let result = evaluate_recommendation_quality(
            "what should I wear?",
            "I recommend a raincoat and boots because heavy showers are expected; \
             you should also bring an umbrella.",
        );
        assert_eq!(result.score, 1.0);
        let MetricData::Recommendations {
            recommendation_count,
            ..
        } = result.data
        else {
            panic!("wrong data shape");
        };
        assert!(recommendation_count >= 3);
    }
}
