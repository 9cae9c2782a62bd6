//! Configuration validation for dpt.
//!
//! Provides validation traits and implementations for the resolved command
//! configurations.

use super::types::{GenerateConfig, ValidateConfig};
use crate::model::IdMinter;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for GenerateConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = IdMinter::new(self.prefix.as_str()) {
            errors.push(ConfigError {
                field: "prefix".to_string(),
                message: e.to_string(),
            });
        }

        for (field, value) in [
            ("agent", &self.agent),
            ("bom_name", &self.bom_name),
            ("dataset_name", &self.dataset_name),
        ] {
            if value.trim().is_empty() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        errors.extend(validate_output_file(self.output_file.as_deref()));
        errors
    }
}

impl Validatable for ValidateConfig {
    fn validate(&self) -> Vec<ConfigError> {
        validate_output_file(self.output_file.as_deref())
    }
}

fn validate_output_file(path: Option<&Path>) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if let Some(parent) = path.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            errors.push(ConfigError {
                field: "output_file".to_string(),
                message: format!("Parent directory does not exist: {}", parent.display()),
            });
        }
    }
    errors
}
