//! Developer-experience metrics.
//!
//! These score the framework, not the reply: each consults the static
//! characteristics catalog and folds a handful of editorial attributes into
//! a 0–1 score with a categorical label. Only debuggability also looks at
//! the live response, to judge whether an explicit error marker comes with a
//! substantive explanation.

use serde::{Deserialize, Serialize};

use crate::evaluation::frameworks::{
    Complexity, DocumentationLevel, ErrorHandlingStyle, FrameworkCatalog, LoggingStyle,
    MemoryIntegration,
};
use crate::evaluation::signals;
use crate::evaluation::{MetricData, MetricResult};

/// How hard the same assistant is to build on this framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    VeryEasy,
    Easy,
    Moderate,
    Difficult,
    VeryDifficult,
    Unknown,
}

impl EffortLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::VeryEasy => "very easy",
            EffortLevel::Easy => "easy",
            EffortLevel::Moderate => "moderate",
            EffortLevel::Difficult => "difficult",
            EffortLevel::VeryDifficult => "very difficult",
            EffortLevel::Unknown => "unknown",
        }
    }

    fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            EffortLevel::VeryEasy
        } else if score >= 0.6 {
            EffortLevel::Easy
        } else if score >= 0.4 {
            EffortLevel::Moderate
        } else if score >= 0.2 {
            EffortLevel::Difficult
        } else {
            EffortLevel::VeryDifficult
        }
    }
}

/// How easy tools, memory, and agents are to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplicityLevel {
    VerySimple,
    Simple,
    Moderate,
    Complex,
    VeryComplex,
    Unknown,
}

impl SimplicityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplicityLevel::VerySimple => "very simple",
            SimplicityLevel::Simple => "simple",
            SimplicityLevel::Moderate => "moderate",
            SimplicityLevel::Complex => "complex",
            SimplicityLevel::VeryComplex => "very complex",
            SimplicityLevel::Unknown => "unknown",
        }
    }

    fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            SimplicityLevel::VerySimple
        } else if score >= 0.6 {
            SimplicityLevel::Simple
        } else if score >= 0.4 {
            SimplicityLevel::Moderate
        } else if score >= 0.2 {
            SimplicityLevel::Complex
        } else {
            SimplicityLevel::VeryComplex
        }
    }
}

/// How clear the logs, errors, and debugging story are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebuggabilityLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl DebuggabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebuggabilityLevel::Excellent => "excellent",
            DebuggabilityLevel::Good => "good",
            DebuggabilityLevel::Moderate => "moderate",
            DebuggabilityLevel::Poor => "poor",
            DebuggabilityLevel::VeryPoor => "very poor",
            DebuggabilityLevel::Unknown => "unknown",
        }
    }

    fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            DebuggabilityLevel::Excellent
        } else if score >= 0.6 {
            DebuggabilityLevel::Good
        } else if score >= 0.4 {
            DebuggabilityLevel::Moderate
        } else if score >= 0.2 {
            DebuggabilityLevel::Poor
        } else {
            DebuggabilityLevel::VeryPoor
        }
    }
}

/// How much work it takes to stand the assistant up on this framework.
pub(crate) fn evaluate_implementation_effort(
    catalog: &FrameworkCatalog,
    framework: &str,
) -> MetricResult {
    let Some(profile) = catalog.get(framework) else {
        return unrecognized_effort(framework);
    };

    let mut raw: f64 = 0.5;
    if profile.files_count <= 3 {
        raw -= 0.2;
    } else if profile.files_count >= 6 {
        raw += 0.2;
    }
    raw += match profile.setup_complexity {
        Complexity::Low => -0.15,
        Complexity::Medium => 0.0,
        Complexity::High => 0.15,
    };
    raw += match profile.code_complexity {
        Complexity::Low => -0.15,
        Complexity::Medium => 0.0,
        Complexity::High => 0.15,
    };

    // Lower raw effort means an easier framework; the reported score is
    // inverted so higher is better.
    let score = 1.0 - raw.clamp(0.0, 1.0);
    let level = EffortLevel::from_score(score);
    let setup = complexity_label(profile.setup_complexity);

    MetricResult::new(
        score,
        format!(
            "{} files, {setup} setup ({})",
            profile.files_count,
            level.as_str()
        ),
        MetricData::Effort {
            effort_level: level,
            files_count: Some(profile.files_count),
            setup_complexity: Some(profile.setup_complexity),
        },
    )
}

/// How easy tools and memory are to wire up on this framework.
pub(crate) fn evaluate_integration_simplicity(
    catalog: &FrameworkCatalog,
    framework: &str,
) -> MetricResult {
    let Some(profile) = catalog.get(framework) else {
        return unrecognized_integration(framework);
    };

    let mut score: f64 = 0.5;
    score += match profile.tool_integration_files {
        1 => 0.3,
        2 => 0.1,
        _ => -0.2,
    };
    score += match profile.memory_integration {
        MemoryIntegration::BuiltIn => 0.2,
        MemoryIntegration::Manual => -0.1,
    };

    let score = score.clamp(0.0, 1.0);
    let level = SimplicityLevel::from_score(score);

    MetricResult::new(
        score,
        format!(
            "{} file(s) to modify, {} memory ({})",
            profile.tool_integration_files,
            profile.memory_integration.label(),
            level.as_str()
        ),
        MetricData::Integration {
            simplicity_level: level,
            tool_files: Some(profile.tool_integration_files),
            memory_approach: Some(profile.memory_integration),
        },
    )
}

/// How clear the framework's logs and errors are, adjusted by whether this
/// reply's own error marker (if any) came with a real explanation.
pub(crate) fn evaluate_debuggability(
    catalog: &FrameworkCatalog,
    framework: &str,
    response: &str,
) -> MetricResult {
    let Some(profile) = catalog.get(framework) else {
        return unrecognized_debuggability(framework);
    };

    let mut score: f64 = 0.5;
    score += match profile.error_handling {
        ErrorHandlingStyle::FrameworkManaged => 0.2,
        ErrorHandlingStyle::Manual => -0.1,
    };
    score += match profile.logging {
        LoggingStyle::FrameworkProvided => 0.2,
        LoggingStyle::Basic => -0.1,
    };

    let response_lower = response.to_lowercase();
    if response_lower.contains("error:") {
        let explained = response.chars().count() > 50
            && signals::contains_any(
                &response_lower,
                &["unable", "could not", "failed", "missing"],
            );
        score += if explained { 0.1 } else { -0.1 };
    }

    score += match profile.documentation {
        DocumentationLevel::Comprehensive => 0.1,
        DocumentationLevel::Moderate => 0.05,
        DocumentationLevel::Minimal => 0.0,
    };

    let score = score.clamp(0.0, 1.0);
    let level = DebuggabilityLevel::from_score(score);

    MetricResult::new(
        score,
        format!(
            "{} logging, {} errors ({})",
            profile.logging.label(),
            profile.error_handling.label(),
            level.as_str()
        ),
        MetricData::Debuggability {
            debuggability_level: level,
            logging_quality: Some(profile.logging),
            error_handling: Some(profile.error_handling),
        },
    )
}

fn complexity_label(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Low => "low",
        Complexity::Medium => "medium",
        Complexity::High => "high",
    }
}

fn unrecognized_effort(framework: &str) -> MetricResult {
    log::debug!("framework tag not in catalog: {framework}");
    MetricResult::new(
        0.5,
        "Framework not recognized",
        MetricData::Effort {
            effort_level: EffortLevel::Unknown,
            files_count: None,
            setup_complexity: None,
        },
    )
}

fn unrecognized_integration(framework: &str) -> MetricResult {
    log::debug!("framework tag not in catalog: {framework}");
    MetricResult::new(
        0.5,
        "Framework not recognized",
        MetricData::Integration {
            simplicity_level: SimplicityLevel::Unknown,
            tool_files: None,
            memory_approach: None,
        },
    )
}

fn unrecognized_debuggability(framework: &str) -> MetricResult {
    log::debug!("framework tag not in catalog: {framework}");
    MetricResult::new(
        0.5,
        "Framework not recognized",
        MetricData::Debuggability {
            debuggability_level: DebuggabilityLevel::Unknown,
            logging_quality: None,
            error_handling: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_framework_is_neutral() {
        let catalog = FrameworkCatalog::builtin();
        for result in [
            evaluate_implementation_effort(&catalog, "mystery"),
            evaluate_integration_simplicity(&catalog, "mystery"),
            evaluate_debuggability(&catalog, "mystery", "hello"),
        ] {
            assert_eq!(result.score, 0.5);
            assert_eq!(result.details, "Framework not recognized");
        }
    }

    #[test]
    fn test_effort_levels_for_builtin_profiles() {
        let catalog = FrameworkCatalog::builtin();

        // Medium setup and code, 5 files: dead neutral either way.
        let gadk = evaluate_implementation_effort(&catalog, "GADK");
        assert_eq!(gadk.score, 0.5);

        // Low setup and code: raw 0.2, inverted to 0.8.
        let ms = evaluate_implementation_effort(&catalog, "MS");
        assert_eq!(ms.score, 0.8);
        assert_eq!(ms.details, "4 files, low setup (very easy)");
    }

    #[test]
    fn test_integration_simplicity_for_builtin_profiles() {
        let catalog = FrameworkCatalog::builtin();

        // 2 tool files (+0.1) and built-in memory (+0.2).
        let gadk = evaluate_integration_simplicity(&catalog, "GADK");
        assert_eq!(gadk.score, 0.8);

        // 1 tool file (+0.3) and manual memory (-0.1).
        let ms = evaluate_integration_simplicity(&catalog, "MS");
        assert_eq!(ms.score, 0.7);
        assert_eq!(ms.details, "1 file(s) to modify, manual memory (simple)");
    }

    #[test]
    fn test_debuggability_for_builtin_profiles() {
        let catalog = FrameworkCatalog::builtin();

        let gadk = evaluate_debuggability(&catalog, "GADK", "All fine today.");
        assert_eq!(gadk.score, 1.0);

        let ms = evaluate_debuggability(&catalog, "MS", "All fine today.");
        assert_eq!(ms.score, 0.35);
    }

    #[test]
    fn test_error_marker_adjustment() {
        let catalog = FrameworkCatalog::builtin();

        let explained = evaluate_debuggability(
            &catalog,
            "GADK",
            "Error: the weather service could not be reached, so live data is missing for now.",
        );
        // 1.0 + 0.1 clamps back to 1.0; use MS to see the swing instead.
        assert_eq!(explained.score, 1.0);

        let terse = evaluate_debuggability(&catalog, "MS", "Error: nope");
        // 0.35 - 0.1.
        assert_eq!(terse.score, 0.25);

        let ms_explained = evaluate_debuggability(
            &catalog,
            "MS",
            "Error: the weather service could not be reached, so live data is missing for now.",
        );
        assert_eq!(ms_explained.score, 0.45);
    }
}
