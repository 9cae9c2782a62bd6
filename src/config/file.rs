//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[".dpt.yaml", ".dpt.yml", "dpt.yaml"];

/// Directory name under the user config directory
const CONFIG_DIR_NAME: &str = "dpt";

/// Directories searched for a config file, in order.
///
/// 1. Current directory
/// 2. User config directory (~/.config/dpt/)
/// 3. Home directory
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME)),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Discover a config file, preferring an explicit path over the
/// [`search_dirs`].
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} does not exist", path.display());
    }

    search_dirs().iter().find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// This is useful for layering CLI args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Generate defaults
        if other.generate.dataset_type.is_some() {
            self.generate.dataset_type = other.generate.dataset_type;
        }
        if other.generate.confidentiality_level.is_some() {
            self.generate.confidentiality_level = other.generate.confidentiality_level;
        }
        if other.generate.compact {
            self.generate.compact = true;
        }

        // Validate defaults (booleans - if set to true, override)
        if other.validate.strict {
            self.validate.strict = true;
        }
        if other.validate.fail_on_warning {
            self.validate.fail_on_warning = true;
        }
        if other.validate.format.is_some() {
            self.validate.format = other.validate.format;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# dpt Configuration File
# ======================
#
# This file configures dpt behavior. Place it at:
#   - .dpt.yaml in your project root
#   - ~/.config/dpt/dpt.yaml for global config
#
# CLI arguments always override file settings.

# Defaults for `dpt generate`
generate:
  # Dataset type: audio, categorical, graph, image, noAssertion, numeric,
  # other, sensor, structured, syntactic, text, timeseries, timestamp, video
  dataset_type: other
  # Confidentiality level: red, amber, green, clear
  confidentiality_level: green
  # Write single-line JSON instead of pretty-printed output
  compact: false

# Defaults for `dpt validate`
validate:
  # Treat digest length and file kind mismatches as errors
  strict: false
  # Exit with code 2 if warnings are found
  fail_on_warning: false
  # Report format: text, json
  format: text
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{GenerateDefaults, ValidateDefaults};
    use crate::model::{ConfidentialityLevel, DatasetType};
    use crate::validation::ReportFormat;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".dpt.yaml");
        std::fs::write(&config_path, "generate:\n  compact: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
generate:
  dataset_type: text
  confidentiality_level: amber
validate:
  fail_on_warning: true
  format: json
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.generate.dataset_type, Some(DatasetType::Text));
        assert_eq!(
            config.generate.confidentiality_level,
            Some(ConfidentialityLevel::Amber)
        );
        assert!(config.validate.fail_on_warning);
        assert!(!config.validate.strict);
        assert_eq!(config.validate.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_rejects_unknown_vocabulary() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "generate:\n  dataset_type: spreadsheet\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig {
            generate: GenerateDefaults {
                dataset_type: Some(DatasetType::Image),
                confidentiality_level: Some(ConfidentialityLevel::Red),
                compact: true,
            },
            ..AppConfig::default()
        };
        let override_config = AppConfig {
            generate: GenerateDefaults {
                dataset_type: Some(DatasetType::Text),
                ..Default::default()
            },
            validate: ValidateDefaults {
                strict: true,
                ..Default::default()
            },
        };

        base.merge(&override_config);

        assert_eq!(base.generate.dataset_type, Some(DatasetType::Text));
        // Unset overrides keep the file value
        assert_eq!(
            base.generate.confidentiality_level,
            Some(ConfidentialityLevel::Red)
        );
        assert!(base.generate.compact);
        assert!(base.validate.strict);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config.generate.dataset_type, Some(DatasetType::Other));
        assert_eq!(config.validate.format, Some(ReportFormat::Text));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "generate:\n  compact: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
