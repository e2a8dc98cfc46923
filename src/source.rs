//! Line-level input and output around the scanner.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Classifies a source I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The file could not be read (missing, unreadable, not UTF-8).
    Read,
    /// The file could not be written.
    Write,
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "failed to read"),
            Self::Write => write!(f, "failed to write"),
        }
    }
}

/// Error produced while reading or writing a source file.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {}: {source}", path.display())]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl SourceError {
    fn new(kind: SourceErrorKind, path: &Path, source: io::Error) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Split source text into physical lines.
///
/// Trailing whitespace (including a `\r` from CRLF endings) is removed
/// from every line; leading whitespace is kept. A final newline does not
/// start an extra empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    text.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Drop trailing whitespace left in front of removed comments.
#[must_use]
pub fn trim_trailing<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim_end().to_string())
        .collect()
}

/// Join lines back into text, terminating each with `\n`.
#[must_use]
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Read a file and split it into lines.
///
/// # Errors
///
/// Returns `SourceError` with kind `Read` when the file cannot be read
/// as UTF-8 text.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, SourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| SourceError::new(SourceErrorKind::Read, path, e))?;
    Ok(split_lines(&text))
}

/// Write lines to a file, replacing its contents.
///
/// # Errors
///
/// Returns `SourceError` with kind `Write` when the file cannot be written.
pub fn write_lines<S: AsRef<str>>(path: impl AsRef<Path>, lines: &[S]) -> Result<(), SourceError> {
    let path = path.as_ref();
    fs::write(path, join_lines(lines))
        .map_err(|e| SourceError::new(SourceErrorKind::Write, path, e))
}
