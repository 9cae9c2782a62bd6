//! Pipeline orchestration for document generation.
//!
//! Input lines flow through the record builder into the document assembler;
//! the finished document is rendered once and written to its target.

mod assemble;
mod generate;
mod output;
pub mod records;

pub use assemble::{DocumentAssembler, DocumentSettings};
pub use generate::build_document;
pub use output::{write_output, write_to, OutputTarget};
pub use records::{parse_line, tokenize, LineRecord, RecordBuilder};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success (or validation found nothing worth failing on)
    pub const SUCCESS: i32 = 0;
    /// Validation found errors
    pub const VALIDATION_ERRORS: i32 = 1;
    /// Validation found warnings and `--fail-on-warning` was set
    pub const VALIDATION_WARNINGS: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
