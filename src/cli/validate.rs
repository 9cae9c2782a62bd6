//! Validate command handler.
//!
//! Implements the `validate` subcommand for checking SPDX 3.0.1 data
//! package documents.

use super::{check_config, emit};
use crate::config::ValidateConfig;
use crate::input::InputSource;
use crate::pipeline::{exit_codes, OutputTarget};
use crate::validation::{render_report, summarize, DocumentValidator, ValidationResult};
use anyhow::{Context, Result};

/// Run the validate command, returning the desired exit code.
///
/// Exit codes: 0 when valid, 1 when any input has errors, 2 when warnings
/// were found and `fail_on_warning` is set.
#[allow(clippy::needless_pass_by_value)]
pub fn run_validate(config: ValidateConfig) -> Result<i32> {
    check_config(&config)?;

    let validator = DocumentValidator::new(config.strict);
    let mut results: Vec<ValidationResult> = Vec::new();

    for source in InputSource::from_args(&config.inputs) {
        let content = source.read_to_string()?;
        results.push(validator.validate_str(&source.display_name(), &content));
    }

    let report = render_report(&results, config.format)
        .context("Failed to serialize validation report")?;

    let target = OutputTarget::from_option(config.output_file);
    if !emit(report.as_bytes(), &target)? {
        return Ok(exit_codes::SUCCESS);
    }

    let (has_errors, has_warnings) = summarize(&results);
    if has_errors {
        return Ok(exit_codes::VALIDATION_ERRORS);
    }
    if config.fail_on_warning && has_warnings {
        return Ok(exit_codes::VALIDATION_WARNINGS);
    }
    Ok(exit_codes::SUCCESS)
}
