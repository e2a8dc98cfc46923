use std::fmt;

/// Significant character runs the scanner looks for in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening of a character literal (`'`).
    SingleQuote,
    /// Opening of a string literal (`"`).
    DoubleQuote,
    /// Opening of a block comment (`/*`).
    BlockCommentStart,
    /// Opening of a line comment (`//`).
    LineCommentStart,
}

impl TokenKind {
    /// All kinds in tie-break order: when two markers start at the same
    /// offset, the one listed first wins.
    pub const PRECEDENCE: [Self; 4] = [
        Self::SingleQuote,
        Self::DoubleQuote,
        Self::BlockCommentStart,
        Self::LineCommentStart,
    ];

    /// Source text that opens this token.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::SingleQuote => "'",
            Self::DoubleQuote => "\"",
            Self::BlockCommentStart => "/*",
            Self::LineCommentStart => "//",
        }
    }

    /// Locate the leftmost occurrence of this token in `text`.
    #[must_use]
    pub fn find_in(self, text: &str) -> Option<Marker> {
        text.find(self.marker())
            .map(|offset| Marker { kind: self, offset })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleQuote => write!(f, "character literal"),
            Self::DoubleQuote => write!(f, "string literal"),
            Self::BlockCommentStart => write!(f, "block comment"),
            Self::LineCommentStart => write!(f, "line comment"),
        }
    }
}

/// A token occurrence: its kind and byte offset in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Marker {
    /// Find the first significant marker in `text`.
    ///
    /// Picks the smallest offset. Ties go to the kind listed first in
    /// [`TokenKind::PRECEDENCE`].
    #[must_use]
    pub fn first_in(text: &str) -> Option<Self> {
        TokenKind::PRECEDENCE
            .iter()
            .filter_map(|kind| kind.find_in(text))
            // min_by_key keeps the first of equal minima
            .min_by_key(|marker| marker.offset)
    }

    /// Byte offset just past the marker text.
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.kind.marker().len()
    }
}
