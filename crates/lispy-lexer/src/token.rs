//! Token types for the Lispy lexer.

use lispy_types::Span;
use std::fmt;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The token's source text.
    pub fn text(&self) -> &str {
        self.kind.text()
    }
}

/// Every token kind in Lispy.
///
/// Atoms are kept as raw text; the reader decides whether one is a number,
/// a boolean or a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Any maximal run of non-whitespace, non-parenthesis characters.
    Atom(String),
}

impl TokenKind {
    pub fn text(&self) -> &str {
        match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Atom(text) => text,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
