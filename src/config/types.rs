//! Configuration types for dpt operations.
//!
//! [`AppConfig`] is what a config file holds. [`GenerateConfig`] and
//! [`ValidateConfig`] are the fully resolved settings handed to the command
//! handlers once file values and CLI flags have been merged.

use crate::model::{ConfidentialityLevel, DatasetType};
use crate::validation::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Settings that can be loaded from a config file.
///
/// CLI flags override file settings (see [`AppConfig::merge`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for the `generate` command
    pub generate: GenerateDefaults,
    /// Defaults for the `validate` command
    pub validate: ValidateDefaults,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Defaults applied to every generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerateDefaults {
    /// Dataset type recorded on the dataset package (default: other)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<DatasetType>,
    /// Confidentiality level recorded on the dataset package (default: green)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality_level: Option<ConfidentialityLevel>,
    /// Write single-line JSON instead of pretty-printed output
    pub compact: bool,
}

/// Defaults for document validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValidateDefaults {
    /// Treat digest length and file kind mismatches as errors
    pub strict: bool,
    /// Exit with code 2 when warnings are found
    pub fail_on_warning: bool,
    /// Report format (default: text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
}

// ============================================================================
// Logging
// ============================================================================

/// Log verbosity, resolved once before the subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    verbose: bool,
}

impl LogConfig {
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Default filter directive; `RUST_LOG` takes precedence when set
    #[must_use]
    pub const fn level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

// ============================================================================
// Resolved command configuration
// ============================================================================

/// Everything the `generate` command needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Name of the creating agent
    pub agent: String,
    /// IRI prefix for every minted id
    pub prefix: String,
    pub bom_name: String,
    pub dataset_name: String,
    pub dataset_type: DatasetType,
    pub confidentiality_level: ConfidentialityLevel,
    /// Input paths; empty means standard input
    pub inputs: Vec<PathBuf>,
    /// Output file (stdout if not specified)
    pub output_file: Option<PathBuf>,
    pub compact: bool,
}

/// Everything the `validate` command needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateConfig {
    /// Input paths; empty means standard input
    pub inputs: Vec<PathBuf>,
    pub strict: bool,
    pub fail_on_warning: bool,
    pub format: ReportFormat,
    /// Output file (stdout if not specified)
    pub output_file: Option<PathBuf>,
}

impl GenerateDefaults {
    /// Fill in the file-level defaults a resolved config needs.
    #[must_use]
    pub fn dataset_type_or_default(&self) -> DatasetType {
        self.dataset_type.unwrap_or_default()
    }

    #[must_use]
    pub fn confidentiality_level_or_default(&self) -> ConfidentialityLevel {
        self.confidentiality_level.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_levels() {
        assert_eq!(LogConfig::new(false).level(), "warn");
        assert_eq!(LogConfig::new(true).level(), "info");
    }

    #[test]
    fn test_generate_defaults() {
        let defaults = GenerateDefaults::default();
        assert_eq!(defaults.dataset_type_or_default(), DatasetType::Other);
        assert_eq!(
            defaults.confidentiality_level_or_default(),
            ConfidentialityLevel::Green
        );
        assert!(!defaults.compact);
    }

    #[test]
    fn test_yaml_roundtrip_uses_vocabulary_terms() {
        let config = AppConfig {
            generate: GenerateDefaults {
                dataset_type: Some(DatasetType::NoAssertion),
                confidentiality_level: Some(ConfidentialityLevel::Amber),
                compact: true,
            },
            ..AppConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("dataset_type: noAssertion"), "{yaml}");
        assert!(yaml.contains("confidentiality_level: amber"), "{yaml}");

        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
