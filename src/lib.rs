//! **Generate and validate SPDX 3.0.1 data package documents.**
//!
//! `datapackage-tools` describes a dataset and the files it contains as an
//! SPDX 3.0.1 bill of materials. It reads `<hash> <filename>` lines, builds a
//! document graph (creation info, creating agent, bom, dataset package, one
//! `software_File` per line, and a single `contains` relationship) and writes
//! it as JSON-LD. Documents can be read back and checked for structural
//! problems.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the typed SPDX 3.0.1 entities and the [`ModelFactory`]
//!   that builds them.
//! - **[`input`]**: standard input and file sources, with transparent gzip
//!   decompression.
//! - **[`pipeline`]**: the line parser, the [`DocumentAssembler`] and output
//!   targets.
//! - **[`jsonld`]**: the JSON-LD writer and a loosely typed graph reader.
//! - **[`validation`]**: the [`DocumentValidator`] and its reports.
//! - **[`config`]**: YAML configuration files and resolved command settings.
//!
//! ## Generating a Document
//!
//! ```
//! use datapackage_tools::jsonld::JsonLdWriter;
//! use datapackage_tools::model::ModelFactory;
//! use datapackage_tools::pipeline::{DocumentAssembler, DocumentSettings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = ModelFactory::new("http://example.org/", "me")?;
//!     let mut assembler = DocumentAssembler::new(factory, &DocumentSettings::new("b", "d"))?;
//!     assembler.push_line("abc123 data/file1.csv")?;
//!     assembler.push_line("def456 data/subdir/")?;
//!
//!     let document = assembler.finish()?;
//!     assert_eq!(document.contains().to().len(), 2);
//!     println!("{}", JsonLdWriter::new().to_string(&document)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Validating a Document
//!
//! ```
//! use datapackage_tools::validation::DocumentValidator;
//!
//! let result = DocumentValidator::new(false).validate_str("<stdin>", r#"{"@graph": []}"#);
//! // No @context
//! assert!(!result.is_valid);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the library crate. The `dpt` binary wraps it
//! with `generate`, `validate`, `completions` and `config` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod jsonld;
pub mod model;
pub mod pipeline;
pub mod validation;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, GenerateConfig, LogConfig, Validatable, ValidateConfig};
pub use error::{DptError, ErrorContext, ParseErrorKind, Result};
pub use input::InputSource;
pub use jsonld::{GraphDocument, JsonLdWriter};
pub use model::{DataPackageDocument, ModelError, ModelFactory};
pub use pipeline::{build_document, DocumentAssembler, DocumentSettings, OutputTarget};
pub use validation::{DocumentValidator, ReportFormat, ValidationResult, Violation};
