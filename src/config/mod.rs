//! Configuration module for dpt.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for resolved command configuration
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.dpt.yaml` file in your project root or `~/.config/dpt/`:
//!
//! ```yaml
//! generate:
//!   dataset_type: text
//!   confidentiality_level: amber
//! validate:
//!   fail_on_warning: true
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, GenerateConfig, GenerateDefaults, LogConfig, ValidateConfig, ValidateDefaults,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    search_dirs, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.dpt.yaml` config files. It can be used by editors for validation and
/// autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_names_sections() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("\"generate\""));
        assert!(schema.contains("\"validate\""));
        assert!(schema.contains("noAssertion"));
    }
}
