//! # weatherbench
//!
//! A rule-based, multi-metric evaluation engine for weather-assistant
//! chatbot responses.
//!
//! Given one conversational turn (the user's query, the assistant's reply,
//! and whatever optional context the host application has on hand: ground
//! truth weather, conversation history, learned preferences, latency and
//! tool-call telemetry), the [`Evaluator`] scores the reply on fourteen
//! fixed metrics and returns an [`EvaluationReport`] keyed by metric name.
//!
//! Scoring is pure, synchronous, and never fails: absent optional context
//! degrades the affected metric to a neutral 0.5 with an explanatory detail
//! string. One evaluator may be shared across threads freely.
//!
//! ```
//! use weatherbench::{EvaluationInput, Evaluator, MetricName};
//!
//! let evaluator = Evaluator::new();
//! let input = EvaluationInput::new(
//!     "What's the weather in Helsinki?",
//!     "It's 4°C and cloudy in Helsinki; I suggest a warm jacket.",
//!     "GADK",
//! )
//! .with_latency(1.2)
//! .with_tool_calls(1);
//!
//! let report = evaluator.evaluate(&input);
//! assert_eq!(report.metrics.len(), 14);
//! assert_eq!(report.get(MetricName::ResponseTime).unwrap().score, 1.0);
//! ```

pub mod conversation;
pub mod evaluation;
pub mod preferences;
pub mod utilities;
pub mod weather;

pub use conversation::ConversationTurn;
pub use evaluation::aggregate::{
    compare_reports, AggregatedReport, AggregationStrategy, ComparisonSummary, MetricDelta,
};
pub use evaluation::frameworks::{CatalogError, FrameworkCatalog, FrameworkProfile};
pub use evaluation::{
    EvaluationInput, EvaluationReport, Evaluator, MetricData, MetricName, MetricResult,
};
pub use preferences::PreferenceFlags;
pub use utilities::SessionCache;
pub use weather::{CurrentConditions, DailySummary, SnapshotShape, WeatherSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
