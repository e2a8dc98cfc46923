use crate::token::{Marker, TokenKind};

const BLOCK_COMMENT_END: &str = "*/";

/// How a backslash in front of a closing quote is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// A quote is escaped when the byte right before it is a backslash.
    /// `"a\\"` is read as an unterminated literal.
    PrecedingBackslash,
    /// A quote is escaped when an odd number of backslashes precede it.
    /// `"a\\"` closes after the second backslash.
    #[default]
    OddBackslashRun,
}

/// What happens when a literal has no closing quote on its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnterminatedLiteral {
    /// Copy the rest of the line through unchanged.
    #[default]
    CopyRest,
    /// Keep the opening quote as plain text and keep scanning after it.
    ResumeAsCode,
}

/// Scanner configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub escape: EscapePolicy,
    pub unterminated: UnterminatedLiteral,
}

impl ScanOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            escape: EscapePolicy::OddBackslashRun,
            unterminated: UnterminatedLiteral::CopyRest,
        }
    }

    #[must_use]
    pub const fn escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    #[must_use]
    pub const fn unterminated(mut self, unterminated: UnterminatedLiteral) -> Self {
        self.unterminated = unterminated;
        self
    }
}

/// Lines of a whole input with comments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Cleaned lines, one per input line.
    pub lines: Vec<String>,
    /// True when the input ended inside an unterminated block comment.
    pub in_block_comment: bool,
}

/// Strip comments from one line using the default options.
///
/// `in_block_comment` says whether the line starts inside a block comment
/// left open by a previous line. Returns the flag to pass in for the next
/// line, and the cleaned line.
#[must_use]
pub fn scan(in_block_comment: bool, line: &str) -> (bool, String) {
    Scanner::default().scan(in_block_comment, line)
}

/// Strip comments from a sequence of lines using the default options.
///
/// The result has exactly one line per input line. Lines that fall
/// entirely inside a block comment come back empty.
#[must_use]
pub fn strip_comments<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    Scanner::default().strip_lines(lines).lines
}

/// Line-oriented comment scanner for C-family source.
///
/// The scanner itself holds no state between lines: the block comment
/// flag is passed in and handed back by [`Scanner::scan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Strip comments from one line.
    ///
    /// Literal contents are copied verbatim, including any comment
    /// markers inside them.
    #[must_use]
    pub fn scan(self, in_block_comment: bool, line: &str) -> (bool, String) {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        if in_block_comment {
            match block_comment_end(rest) {
                Some(end) => rest = &rest[end..],
                None => return (true, out),
            }
        }

        while let Some(marker) = Marker::first_in(rest) {
            let next = match marker.kind {
                TokenKind::SingleQuote => self.copy_literal(rest, marker, b'\'', &mut out),
                TokenKind::DoubleQuote => self.copy_literal(rest, marker, b'"', &mut out),
                TokenKind::BlockCommentStart => {
                    out.push_str(&rest[..marker.offset]);
                    let comment = &rest[marker.end()..];
                    match block_comment_end(comment) {
                        Some(end) => Some(&comment[end..]),
                        None => return (true, out),
                    }
                }
                TokenKind::LineCommentStart => {
                    out.push_str(&rest[..marker.offset]);
                    None
                }
            };

            match next {
                Some(next) => rest = next,
                None => return (false, out),
            }
        }

        out.push_str(rest);
        (false, out)
    }

    /// Strip comments from every line, threading the block comment flag
    /// from each line to the next.
    #[must_use]
    pub fn strip_lines<S: AsRef<str>>(self, lines: &[S]) -> Stripped {
        let mut in_block_comment = false;
        let lines = lines
            .iter()
            .map(|line| {
                let (state, cleaned) = self.scan(in_block_comment, line.as_ref());
                in_block_comment = state;
                cleaned
            })
            .collect();

        if in_block_comment {
            tracing::debug!("input ends inside an unterminated block comment");
        }

        Stripped {
            lines,
            in_block_comment,
        }
    }

    /// Copy the literal opened at `marker` into `out`.
    ///
    /// Returns the text after the closing quote, or `None` when the rest of
    /// the line was consumed.
    fn copy_literal<'a>(
        self,
        rest: &'a str,
        marker: Marker,
        quote: u8,
        out: &mut String,
    ) -> Option<&'a str> {
        out.push_str(&rest[..marker.end()]);
        let body = &rest[marker.end()..];

        if let Some(close) = self.closing_quote(body, quote) {
            // quote is ASCII, so close + 1 is a char boundary
            out.push_str(&body[..=close]);
            return Some(&body[close + 1..]);
        }

        match self.options.unterminated {
            UnterminatedLiteral::CopyRest => {
                tracing::debug!(kind = %marker.kind, "unterminated literal, copying rest of line");
                out.push_str(body);
                None
            }
            UnterminatedLiteral::ResumeAsCode => {
                tracing::debug!(kind = %marker.kind, "unterminated literal, scanning on as code");
                Some(body)
            }
        }
    }

    /// Index of the first unescaped `quote` in a literal body.
    fn closing_quote(self, body: &str, quote: u8) -> Option<usize> {
        let bytes = body.as_bytes();
        bytes
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == quote)
            .map(|(i, _)| i)
            .find(|&i| !self.is_escaped(&bytes[..i]))
    }

    /// Whether a quote following `before` is escaped.
    fn is_escaped(self, before: &[u8]) -> bool {
        let backslashes = before.iter().rev().take_while(|&&b| b == b'\\').count();
        match self.options.escape {
            EscapePolicy::PrecedingBackslash => backslashes > 0,
            EscapePolicy::OddBackslashRun => backslashes % 2 == 1,
        }
    }
}

/// Offset just past the first `*/` in `text`.
fn block_comment_end(text: &str) -> Option<usize> {
    text.find(BLOCK_COMMENT_END)
        .map(|pos| pos + BLOCK_COMMENT_END.len())
}
