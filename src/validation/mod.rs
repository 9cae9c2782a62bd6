//! Structural validation of SPDX 3.0.1 data package documents.
//!
//! [`DocumentValidator`] checks a JSON-LD graph for the properties the
//! generator guarantees: resolvable references, one verified hash per file,
//! well-formed hash values and a dataset rooted in a bom. Findings are
//! reported as [`Violation`]s grouped into a [`ValidationResult`].

mod checks;
mod report;

pub use checks::DocumentValidator;
pub use report::{format_text, render_report, summarize, ReportFormat};

use serde::{Deserialize, Serialize};

/// A single finding against a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Severity: error, warning, info
    pub severity: ViolationSeverity,
    /// Category of the violation
    pub category: ViolationCategory,
    /// Human-readable message
    pub message: String,
    /// Element the finding is about (if applicable)
    pub element: Option<String>,
    /// SPDX class or property the finding concerns
    pub requirement: String,
}

impl Violation {
    pub fn new(
        severity: ViolationSeverity,
        category: ViolationCategory,
        message: impl Into<String>,
        element: Option<String>,
        requirement: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            element,
            requirement: requirement.into(),
        }
    }
}

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    /// The document is invalid
    Error,
    /// The document is usable but suspicious
    Warning,
    /// Informational
    Info,
}

impl ViolationSeverity {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
        }
    }
}

/// Category of validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationCategory {
    /// JSON-LD envelope and node shape
    Structure,
    /// Element identifiers
    Identity,
    /// CreationInfo and its references
    CreationInfo,
    /// File records
    FileInfo,
    /// Hashes and digests
    Integrity,
    /// Dataset package properties
    Dataset,
    /// Relationship endpoints
    Relationships,
    /// Bom roots and elements
    Document,
}

impl ViolationCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Identity => "Identity",
            Self::CreationInfo => "Creation Info",
            Self::FileInfo => "File Information",
            Self::Integrity => "Integrity",
            Self::Dataset => "Dataset",
            Self::Relationships => "Relationships",
            Self::Document => "Document",
        }
    }
}

/// Outcome of validating one input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Input the document was read from
    pub source: String,
    /// True when there are no errors
    pub is_valid: bool,
    /// Whether strict checking was applied
    pub strict: bool,
    /// All findings, in the order they were made
    pub violations: Vec<Violation>,
    /// Error count
    pub error_count: usize,
    /// Warning count
    pub warning_count: usize,
    /// Info count
    pub info_count: usize,
}

impl ValidationResult {
    /// Create a result, counting findings by severity
    pub fn new(source: impl Into<String>, strict: bool, violations: Vec<Violation>) -> Self {
        let count = |severity: ViolationSeverity| {
            violations.iter().filter(|v| v.severity == severity).count()
        };
        let error_count = count(ViolationSeverity::Error);
        let warning_count = count(ViolationSeverity::Warning);
        let info_count = count(ViolationSeverity::Info);

        Self {
            source: source.into(),
            is_valid: error_count == 0,
            strict,
            violations,
            error_count,
            warning_count,
            info_count,
        }
    }

    /// Get violations filtered by severity
    #[must_use]
    pub fn violations_by_severity(&self, severity: ViolationSeverity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Get violations filtered by category
    #[must_use]
    pub fn violations_by_category(&self, category: ViolationCategory) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.category == category)
            .collect()
    }
}
