//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod generate;
mod validate;

pub use generate::run_generate;
pub use validate::run_validate;

// Re-export config types used by handlers
pub use crate::config::{GenerateConfig, ValidateConfig};

use crate::config::Validatable;
use crate::pipeline::{write_output, OutputTarget};
use anyhow::{bail, Result};

/// Reject a configuration that fails validation, listing every problem.
fn check_config(config: &impl Validatable) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid configuration: {}", details.join("; "))
}

/// Write rendered output. Returns `false` when the reader closed stdout
/// before everything was written, which the caller treats as success.
fn emit(content: &[u8], target: &OutputTarget) -> Result<bool> {
    match write_output(content, target) {
        Ok(()) => Ok(true),
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("Output closed by reader; stopping");
            Ok(false)
        }
        Err(e) => {
            tracing::error!("Unable to write to {target}");
            Err(e.into())
        }
    }
}
