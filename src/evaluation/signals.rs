//! Text-signal tables and pattern helpers used by the metric scorers.
//!
//! All matching is plain case-folded substring or regex probing; scorers pass
//! in already-lowercased text.

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Temperature extraction
// ---------------------------------------------------------------------------

/// Patterns that pull a temperature claim out of a response, tried in order;
/// the first match wins.
static TEMP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(\d+(?:\.\d+)?)\s*°?c").unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)\s*degrees?\s*(?:celsius|centigrade)").unwrap(),
        Regex::new(r"temperature[:\s]+(\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)\s*°").unwrap(),
    ]
});

/// Extract the first temperature claim from lowercased response text.
pub(crate) fn extract_temperature(text: &str) -> Option<f64> {
    for pattern in TEMP_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return Some(value);
            }
        }
    }
    None
}

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Whether the text contains any digit.
pub(crate) fn has_digit(text: &str) -> bool {
    DIGIT.is_match(text)
}

// ---------------------------------------------------------------------------
// Condition categories
// ---------------------------------------------------------------------------

/// Synonym sets per condition category, keyed by the provider's category tag.
pub(crate) const CONDITION_KEYWORDS: &[(&str, &[&str])] = &[
    ("rain", &["rain", "rainy", "drizzle", "shower", "precipitation"]),
    ("clear", &["clear", "sunny", "sun", "bright"]),
    ("clouds", &["cloud", "cloudy", "overcast", "clouds"]),
    ("snow", &["snow", "snowy", "snowing", "snowfall"]),
    ("mist", &["mist", "fog", "foggy", "haze"]),
    ("thunderstorm", &["thunder", "storm", "thunderstorm", "lightning"]),
];

/// Look up the synonym set for a condition category tag.
pub(crate) fn condition_synonyms(condition: &str) -> Option<&'static [&'static str]> {
    CONDITION_KEYWORDS
        .iter()
        .find(|(tag, _)| *tag == condition)
        .map(|(_, synonyms)| *synonyms)
}

// ---------------------------------------------------------------------------
// Keyword sets
// ---------------------------------------------------------------------------

pub(crate) const WEATHER_KEYWORDS: &[&str] = &[
    "weather", "temperature", "forecast", "rain", "sunny", "wind", "humidity", "umbrella",
    "jacket", "temp", "degrees",
];

/// Weather vocabulary used by the planner, which also treats activity
/// planning as weather-flavored.
pub(crate) const PLANNING_WEATHER_KEYWORDS: &[&str] = &[
    "weather", "temperature", "forecast", "rain", "sunny", "wind", "humidity", "umbrella",
    "jacket", "temp", "degrees", "outdoor", "activity", "plan",
];

pub(crate) const FORECAST_KEYWORDS: &[&str] =
    &["forecast", "tomorrow", "week", "upcoming", "next", "future"];

pub(crate) const COMPLETION_RECOMMENDATION_KEYWORDS: &[&str] = &[
    "recommend", "suggest", "should", "umbrella", "jacket", "outdoor", "indoor", "wear", "bring",
    "advise", "consider",
];

pub(crate) const RECOMMENDATION_KEYWORDS: &[&str] = &[
    "recommend", "suggest", "should", "advise", "consider", "umbrella", "jacket", "coat",
    "sweater", "raincoat", "outdoor", "indoor", "wear", "bring", "take", "prepare",
];

pub(crate) const ASKS_FOR_RECOMMENDATION: &[&str] = &[
    "should", "recommend", "suggest", "what should", "what to wear", "umbrella", "jacket",
    "outdoor", "indoor", "advice", "help",
];

pub(crate) const SPECIFIC_ITEMS: &[&str] = &[
    "umbrella", "jacket", "coat", "sweater", "raincoat", "boots", "hat", "gloves",
];

pub(crate) const REASONING_KEYWORDS: &[&str] =
    &["because", "due to", "since", "as", "given that", "considering"];

pub(crate) const ERROR_INDICATORS: &[&str] = &[
    "error", "sorry", "couldn't", "can't", "unable", "failed", "not available", "not found",
    "could not", "i'm sorry", "apologize",
];

pub(crate) const GRACEFUL_INDICATORS: &[&str] = &[
    "however", "but", "alternatively", "you could", "you might", "suggest", "recommend", "try",
    "consider", "instead",
];

pub(crate) const MISSING_DATA_PHRASES: &[&str] = &[
    "unable to get", "could not retrieve", "weather data not available", "no weather data",
    "weather information unavailable", "could not fetch",
];

/// Shorter acknowledgement list the planner accepts for "named the data as
/// unavailable".
pub(crate) const PLANNING_MISSING_DATA_PHRASES: &[&str] = &[
    "unable to get", "could not retrieve", "weather data not available", "no weather data",
];

pub(crate) const GENERIC_ADVICE_PHRASES: &[&str] = &[
    "generally", "typically", "usually", "in general", "you might want", "consider", "suggest",
    "recommend", "could", "may want",
];

pub(crate) const CLARIFICATION_REQUEST_PHRASES: &[&str] = &[
    "could you clarify", "could you specify", "which city", "which location", "please provide",
    "need more information", "to better assist",
];

pub(crate) const FALLBACK_INDICATORS: &[&str] = &[
    "you could try", "alternatively", "another option", "you might", "consider", "suggest",
    "recommend", "option",
];

pub(crate) const FLOW_INDICATORS: &[&str] =
    &["first", "then", "next", "after", "based on", "according to"];

pub(crate) const WEATHER_INFO_TOKENS: &[&str] = &[
    "°c", "°f", "degrees", "temperature", "humidity", "wind speed", "forecast",
];

pub(crate) const PLANNING_RECOMMENDATION_TOKENS: &[&str] = &[
    "recommend", "suggest", "should", "umbrella", "jacket", "wear", "bring",
];

/// Probes for the first-occurrence ordering heuristic.
pub(crate) const WEATHER_POSITION_PROBES: &[&str] = &["temperature", "degrees", "°"];
pub(crate) const RECOMMENDATION_POSITION_PROBES: &[&str] = &["recommend", "suggest", "should"];

pub(crate) const AMBIGUITY_CLARIFICATION_PHRASES: &[&str] = &[
    "could you clarify", "could you specify", "which city", "which location", "please provide",
    "need more information", "to better assist", "could you tell me", "what city",
    "what location", "where", "when", "which", "please specify",
];

pub(crate) const ASSUMPTION_INDICATORS: &[&str] = &[
    "assuming", "i'll assume", "if you mean", "probably", "likely", "typically", "generally",
    "usually", "most likely",
];

pub(crate) const LOCATION_REQUEST_PHRASES: &[&str] = &[
    "which city", "what city", "where", "location", "city name", "please specify the city",
    "could you tell me the city",
];

pub(crate) const GUIDANCE_PHRASES: &[&str] = &[
    "you can ask", "you might want to", "for example", "such as", "you could specify",
    "to get better results", "to help you better",
];

pub(crate) const NONDETERMINISM_INDICATORS: &[&str] =
    &["random", "maybe", "perhaps", "might be", "could be different"];

pub(crate) const PREFERENCE_SIGNAL_WORDS: &[&str] =
    &["prefer", "like", "dislike", "hate", "love", "favorite"];

pub(crate) const DAY_TOKENS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "today",
    "tomorrow",
];

// ---------------------------------------------------------------------------
// City extraction
// ---------------------------------------------------------------------------

static CITY_GAZETTEER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(dhaka|helsinki|tampere|stockholm|copenhagen|oslo|reykjavik|oulu|new york|london|paris|tokyo)\b",
    )
    .unwrap()
});

// Loose by construction: "in" is matched as a bare substring, so e.g.
// "rain berlin" also yields a capture.
static CITY_AFTER_IN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)in\s+([a-z][a-z]+)").unwrap());

static CITY_BEFORE_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([a-z][a-z]+)\s+(?:today|tomorrow|weather)").unwrap());

/// Extract candidate city names (lowercased) from a user message.
pub(crate) fn extract_cities(text: &str) -> Vec<String> {
    let mut cities = Vec::new();
    for pattern in [&*CITY_GAZETTEER, &*CITY_AFTER_IN, &*CITY_BEFORE_KEYWORD] {
        for caps in pattern.captures_iter(text) {
            let city = caps[1].to_lowercase();
            if !cities.contains(&city) {
                cities.push(city);
            }
        }
    }
    cities
}

// ---------------------------------------------------------------------------
// Substring helpers
// ---------------------------------------------------------------------------

/// Whether any needle occurs in the haystack.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// How many distinct needles occur in the haystack.
pub(crate) fn count_matches(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|needle| haystack.contains(*needle)).count()
}

/// Earliest byte offset at which any probe occurs.
///
/// An occurrence at offset 0 counts as found; absence is `None`, not a
/// sentinel index.
pub(crate) fn first_occurrence(haystack: &str, probes: &[&str]) -> Option<usize> {
    probes.iter().filter_map(|probe| haystack.find(probe)).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_temperature_celsius_suffix() {
        assert_eq!(extract_temperature("it's 15°c and sunny"), Some(15.0));
        assert_eq!(extract_temperature("around 7.5 degrees celsius"), Some(7.5));
        assert_eq!(extract_temperature("temperature: 12"), Some(12.0));
        assert_eq!(extract_temperature("no numbers here"), None);
    }

    #[test]
    fn test_first_pattern_wins() {
        // The °c form takes precedence over the bare-degree form.
        assert_eq!(extract_temperature("22° out, or 21c by the lake"), Some(21.0));
    }

    #[test]
    fn test_extract_cities_gazetteer_and_patterns() {
        let cities = extract_cities("what's the weather in helsinki today");
        assert!(cities.contains(&"helsinki".to_string()));
    }

    #[test]
    fn test_extract_cities_loose_in_match() {
        // Substring "in" inside "rain" still triggers the in-pattern.
        let cities = extract_cities("rain berlin");
        assert!(cities.contains(&"berlin".to_string()));
    }

    #[test]
    fn test_first_occurrence_at_zero_counts() {
        assert_eq!(first_occurrence("temperature is 10", &["temperature"]), Some(0));
        assert_eq!(first_occurrence("no match", &["temperature"]), None);
    }

    #[test]
    fn test_count_matches_distinct_needles() {
        assert_eq!(
            count_matches("you should bring an umbrella", &["should", "bring", "umbrella", "coat"]),
            3
        );
    }
}
