//! Roll-ups over per-turn evaluation reports.
//!
//! The host application scores every turn of a session for each framework;
//! these helpers collapse a run of reports into one per-metric summary, and
//! line two frameworks' reports up side by side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{round2, EvaluationReport, MetricName};

/// Strategy for collapsing many turns' scores into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// Equal weight to every turn.
    #[default]
    SimpleAverage,
    /// Keep each metric's best score across turns.
    BestPerformance,
    /// Keep each metric's worst score across turns.
    WorstPerformance,
}

/// Per-metric summary of a run of evaluation reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReport {
    /// Framework tag the reports came from.
    pub framework: String,
    /// How many turns were aggregated.
    pub turn_count: usize,
    /// Strategy used to collapse the scores.
    pub strategy: AggregationStrategy,
    /// Collapsed score per metric.
    pub metrics: BTreeMap<MetricName, f64>,
    /// Unweighted mean of the collapsed metric scores.
    pub overall_score: f64,
}

impl AggregatedReport {
    /// Collapse a run of reports; `None` when the run is empty.
    ///
    /// The framework tag is taken from the first report; mixing frameworks
    /// in one run is the caller's mistake and is not detected here.
    pub fn from_reports(
        reports: &[EvaluationReport],
        strategy: AggregationStrategy,
    ) -> Option<Self> {
        let first = reports.first()?;

        let mut metrics = BTreeMap::new();
        for name in MetricName::ALL {
            let scores: Vec<f64> = reports
                .iter()
                .filter_map(|report| report.get(name))
                .map(|metric| metric.score)
                .collect();
            if scores.is_empty() {
                continue;
            }
            let collapsed = match strategy {
                AggregationStrategy::SimpleAverage => {
                    scores.iter().sum::<f64>() / scores.len() as f64
                }
                AggregationStrategy::BestPerformance => {
                    scores.iter().cloned().fold(f64::MIN, f64::max)
                }
                AggregationStrategy::WorstPerformance => {
                    scores.iter().cloned().fold(f64::MAX, f64::min)
                }
            };
            metrics.insert(name, round2(collapsed));
        }

        let overall_score = if metrics.is_empty() {
            0.0
        } else {
            round2(metrics.values().sum::<f64>() / metrics.len() as f64)
        };

        Some(Self {
            framework: first.framework.clone(),
            turn_count: reports.len(),
            strategy,
            metrics,
            overall_score,
        })
    }
}

/// One metric's score difference between two frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    /// Which metric this row compares.
    pub metric: MetricName,
    /// Score on the left framework.
    pub left: f64,
    /// Score on the right framework.
    pub right: f64,
    /// `right - left`, rounded to two decimals.
    pub delta: f64,
}

/// Side-by-side comparison of two frameworks' reports for the same turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    /// Framework tag of the left report.
    pub left: String,
    /// Framework tag of the right report.
    pub right: String,
    /// Per-metric scores and differences, in canonical metric order.
    pub deltas: Vec<MetricDelta>,
    /// Metrics where the left framework scored strictly higher.
    pub left_wins: usize,
    /// Metrics where the right framework scored strictly higher.
    pub right_wins: usize,
    /// Metrics scored identically.
    pub ties: usize,
    /// Tag of the framework with more metric wins, if not tied overall.
    pub winner: Option<String>,
}

/// Line two reports up metric by metric.
///
/// Metrics missing from either report are skipped rather than treated as
/// zero.
pub fn compare_reports(left: &EvaluationReport, right: &EvaluationReport) -> ComparisonSummary {
    let mut deltas = Vec::new();
    let mut left_wins = 0;
    let mut right_wins = 0;
    let mut ties = 0;

    for name in MetricName::ALL {
        let (Some(l), Some(r)) = (left.get(name), right.get(name)) else {
            continue;
        };
        let delta = round2(r.score - l.score);
        if delta > 0.0 {
            right_wins += 1;
        } else if delta < 0.0 {
            left_wins += 1;
        } else {
            ties += 1;
        }
        deltas.push(MetricDelta {
            metric: name,
            left: l.score,
            right: r.score,
            delta,
        });
    }

    let winner = match left_wins.cmp(&right_wins) {
        std::cmp::Ordering::Greater => Some(left.framework.clone()),
        std::cmp::Ordering::Less => Some(right.framework.clone()),
        std::cmp::Ordering::Equal => None,
    };

    ComparisonSummary {
        left: left.framework.clone(),
        right: right.framework.clone(),
        deltas,
        left_wins,
        right_wins,
        ties,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{EvaluationInput, Evaluator};

    fn report(framework: &str, response: &str, latency: f64) -> EvaluationReport {
        let input = EvaluationInput::new("what's the weather like today?", response, framework)
            .with_latency(latency);
        Evaluator::new().evaluate(&input)
    }

    #[test]
    fn test_empty_run_aggregates_to_none() {
        assert!(AggregatedReport::from_reports(&[], AggregationStrategy::SimpleAverage).is_none());
    }

    #[test]
    fn test_average_best_and_worst_agree_with_hand_math() {
        let fast = report("GADK", "The weather is 10 degrees and clear; bring sunglasses.", 1.0);
        let slow = report("GADK", "The weather is 10 degrees and clear; bring sunglasses.", 20.0);
        let runs = [fast, slow];

        let avg =
            AggregatedReport::from_reports(&runs, AggregationStrategy::SimpleAverage).unwrap();
        let best =
            AggregatedReport::from_reports(&runs, AggregationStrategy::BestPerformance).unwrap();
        let worst =
            AggregatedReport::from_reports(&runs, AggregationStrategy::WorstPerformance).unwrap();

        // Only latency differs between the runs: 1.0 vs 0.3.
        assert_eq!(avg.metrics[&MetricName::ResponseTime], 0.65);
        assert_eq!(best.metrics[&MetricName::ResponseTime], 1.0);
        assert_eq!(worst.metrics[&MetricName::ResponseTime], 0.3);
        assert_eq!(avg.turn_count, 2);
    }

    #[test]
    fn test_comparison_counts_wins_and_names_winner() {
        let left = report("GADK", "Sorry, I couldn't get that.", 8.0);
        let right = report(
            "MS",
            "It's 12 degrees with clear weather; I suggest you bring sunglasses.",
            1.0,
        );
        let summary = compare_reports(&left, &right);

        assert_eq!(summary.deltas.len(), 14);
        assert!(summary.right_wins > summary.left_wins);
        assert_eq!(summary.winner.as_deref(), Some("MS"));
    }

    #[test]
    fn test_comparing_report_with_itself_is_a_tie() {
        let report = report("GADK", "It's 12 degrees and clear.", 1.0);
        let summary = compare_reports(&report, &report);
        assert_eq!(summary.ties, 14);
        assert!(summary.winner.is_none());
    }
}
