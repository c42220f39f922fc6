//! Latency and tool-call efficiency.
//!
//! Both scorers are deterministic functions of the telemetry the
//! agent-invocation layer reports; no text inspection involved.

use serde::{Deserialize, Serialize};

use crate::evaluation::{round2, MetricData, MetricResult};

/// Categorical latency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyLevel {
    Excellent,
    Good,
    Acceptable,
    Slow,
    Unknown,
}

impl LatencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatencyLevel::Excellent => "excellent",
            LatencyLevel::Good => "good",
            LatencyLevel::Acceptable => "acceptable",
            LatencyLevel::Slow => "slow",
            LatencyLevel::Unknown => "unknown",
        }
    }
}

/// Categorical tool-call-count band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallLevel {
    /// Zero calls: could mean "nothing needed" or "nothing fetched".
    NoCalls,
    Optimal,
    Good,
    Acceptable,
    Inefficient,
    Unknown,
}

impl ToolCallLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCallLevel::NoCalls => "no_calls",
            ToolCallLevel::Optimal => "optimal",
            ToolCallLevel::Good => "good",
            ToolCallLevel::Acceptable => "acceptable",
            ToolCallLevel::Inefficient => "inefficient",
            ToolCallLevel::Unknown => "unknown",
        }
    }
}

/// Piecewise-linear latency score: faster is strictly better.
///
/// <2s is excellent (1.0); 2–5s ramps 0.9→0.7; 5–10s ramps 0.7→0.5;
/// beyond 10s decays toward a floor of 0.3.
pub(crate) fn evaluate_response_time(latency_secs: Option<f64>) -> MetricResult {
    let Some(seconds) = latency_secs else {
        return MetricResult::new(
            0.5,
            "Response time not available",
            MetricData::Latency {
                time_seconds: None,
                efficiency_level: LatencyLevel::Unknown,
            },
        );
    };

    let (score, level) = if seconds < 2.0 {
        (1.0, LatencyLevel::Excellent)
    } else if seconds < 5.0 {
        (0.9 - ((seconds - 2.0) / 3.0) * 0.2, LatencyLevel::Good)
    } else if seconds < 10.0 {
        (0.7 - ((seconds - 5.0) / 5.0) * 0.2, LatencyLevel::Acceptable)
    } else {
        (
            (0.5 - ((seconds - 10.0) / 10.0) * 0.2).max(0.3),
            LatencyLevel::Slow,
        )
    };

    MetricResult::new(
        score,
        format!("Response time: {seconds:.2}s ({})", level.as_str()),
        MetricData::Latency {
            time_seconds: Some(round2(seconds)),
            efficiency_level: level,
        },
    )
}

/// Step function over the number of tool calls: 1–2 is optimal, more is
/// increasingly redundant, zero is ambiguous.
pub(crate) fn evaluate_tool_call_count(count: Option<u32>) -> MetricResult {
    let Some(count) = count else {
        return MetricResult::new(
            0.5,
            "Tool call count not available",
            MetricData::ToolCalls {
                count: None,
                efficiency_level: ToolCallLevel::Unknown,
            },
        );
    };

    let (score, level) = match count {
        0 => (0.5, ToolCallLevel::NoCalls),
        1..=2 => (1.0, ToolCallLevel::Optimal),
        3..=4 => (0.8, ToolCallLevel::Good),
        5..=6 => (0.6, ToolCallLevel::Acceptable),
        _ => (0.4, ToolCallLevel::Inefficient),
    };

    MetricResult::new(
        score,
        format!("{count} tool call(s) ({})", level.as_str()),
        MetricData::ToolCalls {
            count: Some(count),
            efficiency_level: level,
        },
    )
}
