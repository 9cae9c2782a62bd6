//! Rendering of validation results.

use super::{ValidationResult, ViolationSeverity};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for validation reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON array of results
    Json,
}

/// Render results for all inputs in the requested format.
pub fn render_report(
    results: &[ValidationResult],
    format: ReportFormat,
) -> serde_json::Result<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(results),
        ReportFormat::Text => Ok(results
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n---\n\n")),
    }
}

/// Text rendering of a single result
#[must_use]
pub fn format_text(result: &ValidationResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Validation of {}", result.source));
    lines.push(format!(
        "Status: {} ({} errors, {} warnings, {} info){}",
        if result.is_valid { "VALID" } else { "INVALID" },
        result.error_count,
        result.warning_count,
        result.info_count,
        if result.strict { " [strict]" } else { "" }
    ));
    lines.push(String::new());

    if result.violations.is_empty() {
        lines.push("No violations found.".to_string());
        return lines.join("\n") + "\n";
    }

    for v in &result.violations {
        let element = v.element.as_deref().unwrap_or("-");
        lines.push(format!(
            "[{}] {} | {} | {}",
            v.severity.label(),
            v.category.name(),
            v.requirement,
            element
        ));
        lines.push(format!("  {}", v.message));
    }

    lines.join("\n") + "\n"
}

/// Whether any result has errors, and whether any has warnings
#[must_use]
pub fn summarize(results: &[ValidationResult]) -> (bool, bool) {
    let has = |severity: ViolationSeverity| {
        results
            .iter()
            .any(|r| r.violations.iter().any(|v| v.severity == severity))
    };
    (has(ViolationSeverity::Error), has(ViolationSeverity::Warning))
}
