//! Input sources for line-oriented and document input.
//!
//! Sources are standard input or filesystem paths. Gzip (including
//! multi-member and bgzf files), bzip2 and zstd input is detected from its
//! magic bytes and decompressed transparently.

use crate::error::{DptError, ErrorContext, Result};
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;

/// Leading bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// `BZh`, the bzip2 stream header
const BZIP2_MAGIC: [u8; 3] = *b"BZh";
/// Zstandard frame magic number, little endian
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// A place to read input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    Path(PathBuf),
}

impl InputSource {
    /// Map command-line paths to sources.
    ///
    /// No paths means standard input; `-` also names standard input.
    #[must_use]
    pub fn from_args(paths: &[PathBuf]) -> Vec<Self> {
        if paths.is_empty() {
            return vec![Self::Stdin];
        }
        paths
            .iter()
            .map(|p| {
                if p.as_os_str() == "-" {
                    Self::Stdin
                } else {
                    Self::Path(p.clone())
                }
            })
            .collect()
    }

    /// Name used in log and error messages: `<stdin>` or `path <p>`
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::Path(p) => format!("path {}", p.display()),
        }
    }

    /// Open the source for buffered reading, decompressing compressed input.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        let opened = match self {
            Self::Stdin => decode(io::stdin().lock()),
            Self::Path(p) => File::open(p).and_then(|f| decode(BufReader::new(f))),
        };
        opened.map_err(|e| {
            tracing::error!("Unable to read from {}", self.display_name());
            match self {
                Self::Stdin => DptError::from(e),
                Self::Path(p) => DptError::io(p, e),
            }
        })
    }

    /// Read every line of the source in order, handing each to `f` with
    /// its 1-based line number.
    ///
    /// Lines end at `\n` or `\r\n`. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than failing the read.
    ///
    /// Errors from `f` and read errors carry the source name and line
    /// number as context.
    pub fn for_each_line<F>(&self, mut f: F) -> Result<usize>
    where
        F: FnMut(usize, &str) -> Result<()>,
    {
        let mut reader = self.open()?;
        tracing::info!("Reading from {}", self.display_name());

        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            let line_no = count + 1;
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| {
                    tracing::error!("Unable to read from {}", self.display_name());
                    e
                })
                .with_context(|| format!("{}: line {line_no}", self.display_name()))?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            f(line_no, &line).with_context(|| format!("{}: line {line_no}", self.display_name()))?;
            count += 1;
        }
        Ok(count)
    }

    /// Read the whole source into a string.
    pub fn read_to_string(&self) -> Result<String> {
        let mut reader = self.open()?;
        tracing::info!("Reading from {}", self.display_name());
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .with_context(|| format!("reading {}", self.display_name()))?;
        Ok(content)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Strip one trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Wrap `reader` in a decoder chosen by its leading magic bytes.
fn decode<R: BufRead + 'static>(mut reader: R) -> io::Result<Box<dyn BufRead>> {
    let head = reader.fill_buf()?;
    if head.starts_with(&GZIP_MAGIC) {
        tracing::debug!("Detected gzip-compressed input");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else if head.starts_with(&BZIP2_MAGIC) {
        tracing::debug!("Detected bzip2-compressed input");
        Ok(Box::new(BufReader::new(MultiBzDecoder::new(reader))))
    } else if head.starts_with(&ZSTD_MAGIC) {
        tracing::debug!("Detected zstd-compressed input");
        Ok(Box::new(BufReader::new(zstd::stream::read::Decoder::with_buffer(reader)?)))
    } else {
        Ok(Box::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    #[test]
    fn test_from_args() {
        assert_eq!(InputSource::from_args(&[]), vec![InputSource::Stdin]);

        let sources =
            InputSource::from_args(&[PathBuf::from("a.txt"), PathBuf::from("-"), PathBuf::from("b")]);
        assert_eq!(
            sources,
            vec![
                InputSource::Path(PathBuf::from("a.txt")),
                InputSource::Stdin,
                InputSource::Path(PathBuf::from("b")),
            ]
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(InputSource::Stdin.display_name(), "<stdin>");
        assert_eq!(
            InputSource::Path(PathBuf::from("hashes.txt")).display_name(),
            "path hashes.txt"
        );
    }

    #[test]
    fn test_decode_plain_passthrough() {
        let mut reader = decode(Cursor::new(b"abc 1\n".to_vec())).unwrap();
        let mut out = String::new();
        reader.read_line(&mut out).unwrap();
        assert_eq!(out, "abc 1\n");
    }

    #[test]
    fn test_decode_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"abc123 data/file1.csv\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let reader = decode(Cursor::new(compressed)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["abc123 data/file1.csv"]);
    }

    #[test]
    fn test_decode_bzip2() {
        let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(b"abc123 a.txt\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let reader = decode(Cursor::new(compressed)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["abc123 a.txt"]);
    }

    #[test]
    fn test_decode_zstd() {
        let compressed = zstd::encode_all(Cursor::new(b"abc123 a.txt\nbeef b.txt\n".to_vec()), 0)
            .unwrap();

        let reader = decode(Cursor::new(compressed)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["abc123 a.txt", "beef b.txt"]);
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"a b\n"), b"a b");
        assert_eq!(trim_line_ending(b"a b\r\n"), b"a b");
        assert_eq!(trim_line_ending(b"a b"), b"a b");
        assert_eq!(trim_line_ending(b"\n"), b"");
    }

    #[test]
    fn test_for_each_line_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"abc123 caf\xe9.csv\r\ndef456 plain.txt").unwrap();

        let mut seen = Vec::new();
        let count = InputSource::Path(path)
            .for_each_line(|_, line| {
                seen.push(line.to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec!["abc123 caf\u{fffd}.csv", "def456 plain.txt"]);
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let source = InputSource::Path(PathBuf::from("/nonexistent/dpt/input.txt"));
        match source.open() {
            Err(DptError::Io { path, .. }) => {
                assert_eq!(path, Some(PathBuf::from("/nonexistent/dpt/input.txt")));
            }
            Err(other) => panic!("Expected Io error, got {other}"),
            Ok(_) => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_for_each_line_attaches_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "first\nsecond\n").unwrap();
        let source = InputSource::Path(path);

        let mut seen = Vec::new();
        let count = source
            .for_each_line(|n, line| {
                seen.push((n, line.to_string()));
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen[1], (2, "second".to_string()));

        let err = source
            .for_each_line(|n, _| {
                if n == 2 {
                    Err(DptError::too_few_tokens("second", 1))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(err.to_string().contains("in.txt"), "{err}");
    }
}
