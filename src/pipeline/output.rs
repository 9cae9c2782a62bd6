//! Output handling for generated documents and validation reports.

use crate::error::{DptError, Result};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(p) => write!(f, "path {}", p.display()),
        }
    }
}

/// Write fully rendered output to the target in one go.
///
/// A closed stdout surfaces as an `Io` error for which
/// [`DptError::is_broken_pipe`] is true.
pub fn write_output(content: &[u8], target: &OutputTarget) -> Result<()> {
    tracing::info!("Writing to {target}");
    match target {
        OutputTarget::Stdout => write_to(&mut std::io::stdout().lock(), content),
        OutputTarget::File(path) => {
            std::fs::write(path, content).map_err(|e| DptError::io(path, e))
        }
    }
}

/// Write `content` to `writer` and flush it.
pub fn write_to<W: Write>(writer: &mut W, content: &[u8]) -> Result<()> {
    writer.write_all(content)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/out.jsonld");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputTarget::Stdout.to_string(), "<stdout>");
        assert_eq!(
            OutputTarget::File(PathBuf::from("out.jsonld")).to_string(),
            "path out.jsonld"
        );
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonld");
        write_output(b"{}\n", &OutputTarget::File(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }

    #[test]
    fn test_write_to_unwritable_path_fails() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent/dpt/out.jsonld"));
        let err = write_output(b"{}", &target).unwrap_err();
        assert!(matches!(err, DptError::Io { .. }));
        assert!(!err.is_broken_pipe());
    }

    #[test]
    fn test_broken_pipe_is_recognised() {
        let err = write_to(&mut ClosedPipe, b"data").unwrap_err();
        assert!(err.is_broken_pipe());
    }
}
