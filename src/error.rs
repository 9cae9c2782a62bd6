//! Unified error types for datapackage-tools.
//!
//! This module provides the error hierarchy for the library, with context
//! chaining so failures name the source and line that caused them.

use crate::model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datapackage-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DptError {
    /// Errors while parsing input lines or documents
    #[error("Failed to parse input{}", prefixed(.context))]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The model rejected a value while constructing an entity
    #[error("Could not create {context}")]
    Model {
        context: String,
        #[source]
        source: ModelError,
    },

    /// IO errors, with the path when there is one
    #[error("IO error{}{}", located(.path.as_deref()), prefixed(.context))]
    Io {
        path: Option<PathBuf>,
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unable to parse line {line}, expected at least 2 tokens, found {found}")]
    TooFewTokens { line: String, found: usize },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for datapackage-tools operations
pub type Result<T> = std::result::Result<T, DptError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DptError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a line with too few tokens
    pub fn too_few_tokens(line: impl Into<String>, found: usize) -> Self {
        Self::parse(
            String::new(),
            ParseErrorKind::TooFewTokens {
                line: line.into(),
                found,
            },
        )
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Wrap a model rejection, naming what was being created
    pub fn model(context: impl Into<String>, source: ModelError) -> Self {
        Self::Model {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            context: String::new(),
            source,
        }
    }

    /// Whether this error was caused by the reading end of the output closing.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::BrokenPipe
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            context: String::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DptError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain, so an error raised while building a record and
/// annotated by the reader reads "path data.txt: line 3: ...".
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DptError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DptError, new_ctx: &str) -> DptError {
    match err {
        DptError::Parse {
            context: existing,
            source,
        } => DptError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DptError::Model {
            context: existing,
            source,
        } => DptError::Model {
            context: chain_context(&existing, new_ctx),
            source,
        },
        DptError::Io {
            path,
            context: existing,
            source,
        } => DptError::Io {
            path,
            context: chain_context(new_ctx, &existing),
            source,
        },
    }
}

/// Render a path as an ` at <path>` suffix, or nothing for standard streams.
fn located(path: Option<&std::path::Path>) -> String {
    path.map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

/// Render a context string as a `: `-prefixed suffix, or nothing when empty.
fn prefixed(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(": {context}")
    }
}

/// Chain two context strings together.
///
/// If either side is empty, returns the other one.
/// Otherwise, returns "`first`: `second`".
fn chain_context(first: &str, second: &str) -> String {
    if second.is_empty() {
        first.to_string()
    } else if first.is_empty() {
        second.to_string()
    } else {
        format!("{first}: {second}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_too_few_tokens_names_line() {
        let err = DptError::too_few_tokens("onlyonetoken", 1);
        let source = err.source().expect("parse errors carry a source").to_string();
        assert_eq!(
            source,
            "Unable to parse line onlyonetoken, expected at least 2 tokens, found 1"
        );
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DptError::io("/path/to/hashes.txt", io_err);

        assert!(err.to_string().contains("/path/to/hashes.txt"));
    }

    #[test]
    fn test_io_display_without_path_or_repeated_source() {
        let err: Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "bad bytes",
        )
        .into());
        let err = err.context("<stdin>: line 1").unwrap_err();
        assert_eq!(err.to_string(), "IO error: <stdin>: line 1");

        let chain = anyhow::Error::from(err);
        assert_eq!(format!("{chain:#}"), "IO error: <stdin>: line 1: bad bytes");

        let err = DptError::io("data/in.txt", std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "IO error at data/in.txt");
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(DptError::too_few_tokens("x", 1));
        let chained = initial.context("line 3").context("path data.txt");

        match chained {
            Err(DptError::Parse { context, .. }) => {
                assert_eq!(context, "path data.txt: line 3");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_model_context_keeps_subject_first() {
        let initial: Result<()> = Err(DptError::model(
            "file from line abc",
            ModelError::InvalidHashValue {
                value: "xyz".to_string(),
            },
        ));
        let err = initial.context("line 7").unwrap_err();
        assert!(err.to_string().starts_with("Could not create file from line abc"));
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(DptError::too_few_tokens("x", 1));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_broken_pipe_detection() {
        let err: DptError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(err.is_broken_pipe());

        let err: DptError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(!err.is_broken_pipe());
        assert!(!DptError::too_few_tokens("x", 1).is_broken_pipe());
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("", "existing"), "existing");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
