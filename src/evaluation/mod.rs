//! Multi-metric response evaluation.
//!
//! Provides the [`Evaluator`], which judges one conversational turn's reply
//! against ground-truth weather data, conversation history, and learned user
//! preferences, producing an [`EvaluationReport`] of fourteen fixed metrics:
//! - Factual accuracy against the weather snapshot
//! - Task completion and recommendation quality
//! - Context retention and preference adaptation
//! - Latency and tool-call efficiency
//! - Action planning and error recovery
//! - Developer experience (effort, integration, debuggability)
//! - Ambiguity handling and repeatability
//!
//! Scoring is pure and synchronous: every metric is a deterministic function
//! of the call's inputs, and missing optional context degrades to the neutral
//! score 0.5 instead of failing.

pub mod aggregate;
pub mod frameworks;
pub mod metrics;
pub(crate) mod signals;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::conversation::ConversationTurn;
use crate::weather::{self, WeatherSnapshot};
use frameworks::{
    Complexity, ErrorHandlingStyle, FrameworkCatalog, LoggingStyle, MemoryIntegration,
};
use metrics::developer::{DebuggabilityLevel, EffortLevel, SimplicityLevel};
use metrics::efficiency::{LatencyLevel, ToolCallLevel};

// ---------------------------------------------------------------------------
// Metric names
// ---------------------------------------------------------------------------

/// The fourteen fixed metrics of an evaluation report.
///
/// Declaration order is the report's canonical ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Accuracy,
    TaskCompletion,
    RecommendationQuality,
    ContextRetention,
    AdaptationQuality,
    ResponseTime,
    ToolCallCount,
    ActionPlanning,
    ErrorRecovery,
    ImplementationEffort,
    IntegrationSimplicity,
    Debuggability,
    AmbiguityHandling,
    Repeatability,
}

impl MetricName {
    /// All metric names in report order.
    pub const ALL: [MetricName; 14] = [
        MetricName::Accuracy,
        MetricName::TaskCompletion,
        MetricName::RecommendationQuality,
        MetricName::ContextRetention,
        MetricName::AdaptationQuality,
        MetricName::ResponseTime,
        MetricName::ToolCallCount,
        MetricName::ActionPlanning,
        MetricName::ErrorRecovery,
        MetricName::ImplementationEffort,
        MetricName::IntegrationSimplicity,
        MetricName::Debuggability,
        MetricName::AmbiguityHandling,
        MetricName::Repeatability,
    ];

    /// The snake_case key used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Accuracy => "accuracy",
            MetricName::TaskCompletion => "task_completion",
            MetricName::RecommendationQuality => "recommendation_quality",
            MetricName::ContextRetention => "context_retention",
            MetricName::AdaptationQuality => "adaptation_quality",
            MetricName::ResponseTime => "response_time",
            MetricName::ToolCallCount => "tool_call_count",
            MetricName::ActionPlanning => "action_planning",
            MetricName::ErrorRecovery => "error_recovery",
            MetricName::ImplementationEffort => "implementation_effort",
            MetricName::IntegrationSimplicity => "integration_simplicity",
            MetricName::Debuggability => "debuggability",
            MetricName::AmbiguityHandling => "ambiguity_handling",
            MetricName::Repeatability => "repeatability",
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Metric results
// ---------------------------------------------------------------------------

/// Metric-specific auxiliary data, flattened into the serialized result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricData {
    /// Factual-accuracy penalty reasons.
    Accuracy { factual_errors: Vec<String> },
    /// Task-completion flag.
    Completion { completed: bool },
    /// Recommendation presence and distinct-keyword count.
    Recommendations {
        has_recommendations: bool,
        recommendation_count: usize,
    },
    /// Which context categories the response retained.
    Retention { retained_items: Vec<String> },
    /// Which preference-adaptation categories fired.
    Adaptations { adaptations_detected: Vec<String> },
    /// Latency telemetry and its categorical level.
    Latency {
        time_seconds: Option<f64>,
        efficiency_level: LatencyLevel,
    },
    /// Tool-call telemetry and its categorical level.
    ToolCalls {
        count: Option<u32>,
        efficiency_level: ToolCallLevel,
    },
    /// Observed strengths and issues (planning, recovery).
    Diagnostics {
        strengths: Vec<String>,
        issues: Vec<String>,
    },
    /// Ambiguity diagnostics plus the computed ambiguity flag.
    Ambiguity {
        strengths: Vec<String>,
        issues: Vec<String>,
        is_ambiguous: bool,
    },
    /// Implementation-effort level and the profile facts behind it.
    Effort {
        effort_level: EffortLevel,
        #[serde(skip_serializing_if = "Option::is_none")]
        files_count: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        setup_complexity: Option<Complexity>,
    },
    /// Integration-simplicity level and the profile facts behind it.
    Integration {
        simplicity_level: SimplicityLevel,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_files: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        memory_approach: Option<MemoryIntegration>,
    },
    /// Debuggability level and the profile facts behind it.
    Debuggability {
        debuggability_level: DebuggabilityLevel,
        #[serde(skip_serializing_if = "Option::is_none")]
        logging_quality: Option<LoggingStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_handling: Option<ErrorHandlingStyle>,
    },
}

/// One metric's contribution to an evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    /// Score in [0.0, 1.0], rounded to two decimals.
    pub score: f64,
    /// Human-readable explanation of the score.
    pub details: String,
    /// Metric-specific auxiliary data.
    #[serde(flatten)]
    pub data: MetricData,
}

impl MetricResult {
    /// Build a result, clamping the score into [0.0, 1.0] and rounding it
    /// to two decimals.
    pub(crate) fn new(score: f64, details: impl Into<String>, data: MetricData) -> Self {
        Self {
            score: round2(score.clamp(0.0, 1.0)),
            details: details.into(),
            data,
        }
    }
}

/// Round to two decimal places, matching how scores are displayed.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Evaluation input
// ---------------------------------------------------------------------------

/// Everything the evaluator may consult for one conversational turn.
///
/// Only query, response, and framework tag are required; every other field
/// is optional context whose absence lowers confidence, never correctness.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    /// The user's query for this turn.
    pub query: &'a str,
    /// The assistant's reply being judged.
    pub response: &'a str,
    /// Tag of the framework that produced the reply.
    pub framework: &'a str,
    /// Ground-truth weather payload the reply was based on, if any.
    pub weather: Option<&'a Value>,
    /// Prior turns of this conversation, oldest first.
    pub history: Option<&'a [ConversationTurn]>,
    /// Raw learned-preference state in either known schema.
    pub preferences: Option<&'a Value>,
    /// Wall-clock seconds the reply took to produce.
    pub latency_secs: Option<f64>,
    /// Number of tool/API calls the agent made for this turn.
    pub tool_call_count: Option<u32>,
}

impl<'a> EvaluationInput<'a> {
    /// Create an input with only the required fields.
    pub fn new(query: &'a str, response: &'a str, framework: &'a str) -> Self {
        Self {
            query,
            response,
            framework,
            weather: None,
            history: None,
            preferences: None,
            latency_secs: None,
            tool_call_count: None,
        }
    }

    /// Attach the ground-truth weather payload.
    pub fn with_weather(mut self, weather: &'a Value) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Attach prior conversation turns.
    pub fn with_history(mut self, history: &'a [ConversationTurn]) -> Self {
        self.history = Some(history);
        self
    }

    /// Attach raw learned-preference state.
    pub fn with_preferences(mut self, preferences: &'a Value) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Attach response latency in seconds.
    pub fn with_latency(mut self, seconds: f64) -> Self {
        self.latency_secs = Some(seconds);
        self
    }

    /// Attach the tool-call count.
    pub fn with_tool_calls(mut self, count: u32) -> Self {
        self.tool_call_count = Some(count);
        self
    }
}

// ---------------------------------------------------------------------------
// Evaluation report
// ---------------------------------------------------------------------------

/// The full scoring report for one conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Framework tag the reply came from.
    pub framework: String,
    /// Every metric's result, in canonical order.
    pub metrics: BTreeMap<MetricName, MetricResult>,
}

impl EvaluationReport {
    /// Look up one metric's result.
    pub fn get(&self, metric: MetricName) -> Option<&MetricResult> {
        self.metrics.get(&metric)
    }

    /// Unweighted mean of all metric scores.
    pub fn overall_score(&self) -> f64 {
        if self.metrics.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.metrics.values().map(|m| m.score).sum();
        round2(sum / self.metrics.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Multi-metric scorer for weather-assistant replies.
///
/// The only construction-time state is the framework-characteristics
/// catalog, which is read-only afterwards; [`Evaluator::evaluate`] may be
/// called concurrently from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    catalog: FrameworkCatalog,
}

impl Evaluator {
    /// Create an evaluator with the built-in framework catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a custom framework catalog.
    pub fn with_catalog(catalog: FrameworkCatalog) -> Self {
        Self { catalog }
    }

    /// The framework catalog this evaluator consults.
    pub fn catalog(&self) -> &FrameworkCatalog {
        &self.catalog
    }

    /// Score one conversational turn on all fourteen metrics.
    ///
    /// Never fails: scorers whose optional context is absent return the
    /// neutral score 0.5 with an explanatory detail string.
    pub fn evaluate(&self, input: &EvaluationInput<'_>) -> EvaluationReport {
        // A payload that is present but empty means "nothing was fetched":
        // absent for accuracy/planning purposes, but not strictly missing
        // the way recovery's acknowledgement check defines it.
        let weather_missing = input.weather.is_none();
        let snapshot = match input.weather {
            Some(value) if weather::has_payload(value) => Some(WeatherSnapshot::from_value(value)),
            _ => None,
        };
        let weather_available = snapshot.is_some();

        let mut report = BTreeMap::new();
        report.insert(
            MetricName::Accuracy,
            metrics::accuracy::evaluate_accuracy(input.query, input.response, snapshot.as_ref()),
        );
        report.insert(
            MetricName::TaskCompletion,
            metrics::completion::evaluate_task_completion(input.query, input.response),
        );
        report.insert(
            MetricName::RecommendationQuality,
            metrics::completion::evaluate_recommendation_quality(input.query, input.response),
        );
        report.insert(
            MetricName::ContextRetention,
            metrics::context::evaluate_context_retention(
                input.query,
                input.response,
                input.history,
            ),
        );
        report.insert(
            MetricName::AdaptationQuality,
            metrics::context::evaluate_adaptation_quality(input.response, input.preferences),
        );
        report.insert(
            MetricName::ResponseTime,
            metrics::efficiency::evaluate_response_time(input.latency_secs),
        );
        report.insert(
            MetricName::ToolCallCount,
            metrics::efficiency::evaluate_tool_call_count(input.tool_call_count),
        );
        report.insert(
            MetricName::ActionPlanning,
            metrics::planning::evaluate_action_planning(
                input.query,
                input.response,
                weather_available,
                input.tool_call_count,
            ),
        );
        report.insert(
            MetricName::ErrorRecovery,
            metrics::planning::evaluate_error_recovery(
                input.query,
                input.response,
                weather_missing,
                weather_available,
            ),
        );
        report.insert(
            MetricName::ImplementationEffort,
            metrics::developer::evaluate_implementation_effort(&self.catalog, input.framework),
        );
        report.insert(
            MetricName::IntegrationSimplicity,
            metrics::developer::evaluate_integration_simplicity(&self.catalog, input.framework),
        );
        report.insert(
            MetricName::Debuggability,
            metrics::developer::evaluate_debuggability(
                &self.catalog,
                input.framework,
                input.response,
            ),
        );
        report.insert(
            MetricName::AmbiguityHandling,
            metrics::robustness::evaluate_ambiguity_handling(input.query, input.response),
        );
        report.insert(
            MetricName::Repeatability,
            metrics::robustness::evaluate_repeatability(input.query, input.response, input.history),
        );

        EvaluationReport {
            framework: input.framework.to_string(),
            metrics: report,
        }
    }
}
