//! Comment stripper for C-family source text.
//!
//! Removes `// line` and `/* block */` comments while leaving string and
//! character literals untouched. Works line by line: the output always has
//! the same number of lines as the input, and a block comment spanning
//! several lines leaves the inner lines empty.
//!
//! # Quick start
//!
//! ## Strip a whole file's worth of lines
//!
//! ```
//! use cstrip::strip_comments;
//!
//! let lines = ["int x; /* c1", "more c1 */ int y; // done"];
//! assert_eq!(strip_comments(&lines), vec!["int x; ", " int y; "]);
//! ```
//!
//! ## Drive the scanner one line at a time
//!
//! ```
//! use cstrip::scan;
//!
//! let (in_comment, line) = scan(false, r#"puts("/* kept */"); /* open"#);
//! assert!(in_comment);
//! assert_eq!(line, r#"puts("/* kept */"); "#);
//!
//! let (in_comment, line) = scan(in_comment, "closed */ return 0;");
//! assert!(!in_comment);
//! assert_eq!(line, " return 0;");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod scanner;
pub mod source;
pub mod token;

use std::path::Path;

pub use scanner::{
    EscapePolicy, ScanOptions, Scanner, Stripped, UnterminatedLiteral, scan, strip_comments,
};
pub use source::{
    SourceError, SourceErrorKind, join_lines, read_lines, split_lines, trim_trailing, write_lines,
};
pub use token::{Marker, TokenKind};

/// Strip comments from source text in one step, using the default options.
///
/// Trailing whitespace is dropped from every line, including whitespace
/// that sat in front of a removed comment, and each output line ends with
/// `\n`. Feeding the output back in returns it unchanged.
#[must_use]
pub fn strip_str(input: &str) -> String {
    join_lines(&trim_trailing(&strip_comments(&split_lines(input))))
}

/// Read a file and strip its comments.
pub fn strip_file(path: impl AsRef<Path>, options: ScanOptions) -> Result<Stripped, SourceError> {
    let lines = read_lines(path)?;
    Ok(Scanner::new(options).strip_lines(&lines))
}
