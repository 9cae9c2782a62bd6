//! Line-to-record mapping.
//!
//! Each input line is `<hash> <name> [ignored...]`. A line becomes one
//! `software_File` verified by one hash.
//!
//! `sha256sum` and friends escape names holding a backslash or a line
//! break and mark such lines with a leading `\`. Those lines are
//! unescaped here.

use crate::error::{DptError, Result};
use crate::model::{ModelFactory, SpdxFile};
use std::borrow::Cow;

/// The two meaningful tokens of an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// Token 0, taken verbatim as the hash value
    pub hash_value: &'a str,
    /// Token 1, the file name
    pub name: Cow<'a, str>,
}

/// Split a line on runs of whitespace, discarding empty tokens.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse a line into its hash and name. Extra tokens are ignored.
pub fn parse_line(line: &str) -> Result<LineRecord<'_>> {
    let tokens = tokenize(line);
    match tokens.as_slice() {
        &[hash_value, name, ..] => Ok(match hash_value.strip_prefix('\\') {
            Some(hash_value) => LineRecord {
                hash_value,
                name: Cow::Owned(unescape_name(name)),
            },
            None => LineRecord {
                hash_value,
                name: Cow::Borrowed(name),
            },
        }),
        _ => Err(DptError::too_few_tokens(line, tokens.len())),
    }
}

/// Undo checksum-tool escaping: `\\` is a backslash, `\n` a newline and
/// `\r` a carriage return. Other sequences are kept as written.
fn unescape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Builds file records through a [`ModelFactory`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    factory: &'a mut ModelFactory,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(factory: &'a mut ModelFactory) -> Self {
        Self { factory }
    }

    /// Parse `line` and build its file record and hash.
    pub fn build_file(&mut self, line: &str) -> Result<SpdxFile> {
        let record = parse_line(line)?;
        self.factory
            .create_file(&record.name, record.hash_value)
            .map_err(|e| DptError::model(format!("file from line {line}"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::model::{FileKind, SequentialIds};

    fn factory() -> ModelFactory {
        ModelFactory::with_id_source("http://example.org/", "me", Box::new(SequentialIds::new()))
            .unwrap()
    }

    #[test]
    fn test_tokenize_runs_of_whitespace() {
        assert_eq!(tokenize("  abc\t\t data/a.csv   extra "), vec!["abc", "data/a.csv", "extra"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t ").is_empty());
    }

    #[test]
    fn test_parse_line_ignores_extra_tokens() {
        let record = parse_line("abc123 data/file1.csv 1024 2024-01-01").unwrap();
        assert_eq!(record.hash_value, "abc123");
        assert_eq!(record.name, "data/file1.csv");
    }

    #[test]
    fn test_parse_line_too_few_tokens() {
        match parse_line("onlyonetoken") {
            Err(DptError::Parse {
                source: ParseErrorKind::TooFewTokens { line, found },
                ..
            }) => {
                assert_eq!(line, "onlyonetoken");
                assert_eq!(found, 1);
            }
            other => panic!("Expected TooFewTokens, got {other:?}"),
        }

        match parse_line("") {
            Err(DptError::Parse {
                source: ParseErrorKind::TooFewTokens { found, .. },
                ..
            }) => assert_eq!(found, 0),
            other => panic!("Expected TooFewTokens, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_line_escaped_name() {
        let record = parse_line(
            "\\e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855  a\\nb\\\\c.txt",
        )
        .unwrap();
        assert_eq!(
            record.hash_value,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(record.name, "a\nb\\c.txt");
    }

    #[test]
    fn test_unescaped_line_keeps_backslashes() {
        let record = parse_line("abc123 dir\\n.txt").unwrap();
        assert_eq!(record.name, "dir\\n.txt");
    }

    #[test]
    fn test_build_file() {
        let mut factory = factory();
        let mut builder = RecordBuilder::new(&mut factory);

        let file = builder.build_file("abc123 data/file1.csv").unwrap();
        assert_eq!(file.name(), "data/file1.csv");
        assert_eq!(file.hash().value(), "abc123");
        assert_eq!(file.kind(), FileKind::File);

        let dir = builder.build_file("def456\tdata/subdir/").unwrap();
        assert_eq!(dir.kind(), FileKind::Directory);
    }

    #[test]
    fn test_build_file_wraps_model_rejection() {
        let mut factory = factory();
        let err = RecordBuilder::new(&mut factory)
            .build_file("zzz data/file1.csv")
            .unwrap_err();
        assert!(matches!(err, DptError::Model { .. }));
        assert_eq!(
            err.to_string(),
            "Could not create file from line zzz data/file1.csv"
        );
    }
}
