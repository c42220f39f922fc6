//! Static per-framework characteristics used by the developer-experience
//! metrics.
//!
//! The catalog encodes editorial judgments about each agent framework (file
//! counts, setup complexity, integration style), not derived facts. It is a
//! plain value: embedders and tests can extend it, replace profiles, or load
//! a catalog from a JSON document or file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Characteristic scales
// ---------------------------------------------------------------------------

/// Coarse complexity scale for setup and code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// How a framework wires conversation memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryIntegration {
    /// Session/memory service ships with the framework.
    BuiltIn,
    /// The application manages its own storage.
    Manual,
}

impl MemoryIntegration {
    /// Short label used in detail strings.
    pub fn label(&self) -> &'static str {
        match self {
            MemoryIntegration::BuiltIn => "built-in",
            MemoryIntegration::Manual => "manual",
        }
    }
}

/// How errors surface to the application developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorHandlingStyle {
    FrameworkManaged,
    Manual,
}

impl ErrorHandlingStyle {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorHandlingStyle::FrameworkManaged => "framework managed",
            ErrorHandlingStyle::Manual => "manual",
        }
    }
}

/// What the framework gives you for logging out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingStyle {
    FrameworkProvided,
    Basic,
}

impl LoggingStyle {
    pub fn label(&self) -> &'static str {
        match self {
            LoggingStyle::FrameworkProvided => "framework provided",
            LoggingStyle::Basic => "basic",
        }
    }
}

/// Documentation coverage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationLevel {
    Comprehensive,
    Moderate,
    Minimal,
}

// ---------------------------------------------------------------------------
// Framework profile
// ---------------------------------------------------------------------------

/// Static qualities of one agent framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkProfile {
    /// Source files a minimal assistant needs in this framework.
    pub files_count: u32,
    /// How involved initial setup is.
    pub setup_complexity: Complexity,
    /// Files that must change to wire in one new tool.
    pub tool_integration_files: u32,
    /// Memory integration style.
    pub memory_integration: MemoryIntegration,
    /// Error handling style.
    pub error_handling: ErrorHandlingStyle,
    /// Logging style.
    pub logging: LoggingStyle,
    /// Overall code complexity of an application built on it.
    pub code_complexity: Complexity,
    /// Documentation coverage.
    pub documentation: DocumentationLevel,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Error loading a catalog from an external document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document did not parse as profile JSON.
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lookup table from framework tag to its profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkCatalog {
    profiles: BTreeMap<String, FrameworkProfile>,
}

impl Default for FrameworkCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FrameworkCatalog {
    /// The catalog of the two frameworks this comparison ships with.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "GADK".to_string(),
            FrameworkProfile {
                files_count: 5,
                setup_complexity: Complexity::Medium,
                tool_integration_files: 2,
                memory_integration: MemoryIntegration::BuiltIn,
                error_handling: ErrorHandlingStyle::FrameworkManaged,
                logging: LoggingStyle::FrameworkProvided,
                code_complexity: Complexity::Medium,
                documentation: DocumentationLevel::Comprehensive,
            },
        );
        profiles.insert(
            "MS".to_string(),
            FrameworkProfile {
                files_count: 4,
                setup_complexity: Complexity::Low,
                tool_integration_files: 1,
                memory_integration: MemoryIntegration::Manual,
                error_handling: ErrorHandlingStyle::Manual,
                logging: LoggingStyle::Basic,
                code_complexity: Complexity::Low,
                documentation: DocumentationLevel::Moderate,
            },
        );
        Self { profiles }
    }

    /// An empty catalog, for embedders that supply every profile themselves.
    pub fn empty() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// Look up a framework profile by tag.
    pub fn get(&self, framework: &str) -> Option<&FrameworkProfile> {
        self.profiles.get(framework)
    }

    /// Add or replace a profile.
    pub fn insert(&mut self, framework: impl Into<String>, profile: FrameworkProfile) {
        self.profiles.insert(framework.into(), profile);
    }

    /// Number of known frameworks.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Parse a catalog from a JSON document mapping tags to profiles.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(document)?;
        log::debug!("loaded framework catalog with {} profile(s)", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_both_frameworks() {
        let catalog = FrameworkCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("GADK").unwrap().files_count, 5);
        assert_eq!(catalog.get("MS").unwrap().tool_integration_files, 1);
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn test_insert_overrides_profile() {
        let mut catalog = FrameworkCatalog::builtin();
        let mut profile = catalog.get("MS").unwrap().clone();
        profile.files_count = 9;
        catalog.insert("MS", profile);
        assert_eq!(catalog.get("MS").unwrap().files_count, 9);
    }

    #[test]
    fn test_from_json_round_trip() {
        let catalog = FrameworkCatalog::builtin();
        let document = serde_json::to_string(&catalog).unwrap();
        let parsed = FrameworkCatalog::from_json(&document).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(FrameworkCatalog::from_json("{not json").is_err());
    }
}
