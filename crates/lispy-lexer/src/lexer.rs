//! Core Lispy lexer.
//!
//! Parentheses are always tokens of their own; everything else is split on
//! whitespace. This is the same token sequence as padding every parenthesis
//! with spaces and splitting on whitespace, with positions tracked on the way.
//! Lexing never fails.

use lispy_types::Span;

use crate::token::{Token, TokenKind};

/// The Lispy lexer.
pub struct Lexer<'src> {
    chars: std::iter::Peekable<std::str::Chars<'src>>,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer over the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start_line = self.line;
        let start_col = self.col;
        let ch = self.advance()?;

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => {
                let mut text = String::from(ch);
                while let Some(&next) = self.chars.peek() {
                    if next.is_whitespace() || next == '(' || next == ')' {
                        break;
                    }
                    text.push(next);
                    self.advance();
                }
                TokenKind::Atom(text)
            }
        };

        let span = Span::new(start_line, start_col, self.line, self.col.saturating_sub(1).max(1));
        Some(Token::new(kind, span))
    }
}

/// Split source text into token texts.
pub fn tokenize(source: &str) -> Vec<String> {
    Lexer::new(source)
        .lex()
        .into_iter()
        .map(|t| t.text().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_track_lines() {
        let tokens = Lexer::new("(a\n  bc)").lex();
        assert_eq!(tokens[0].span, Span::new(1, 1, 1, 1));
        assert_eq!(tokens[1].span, Span::new(1, 2, 1, 2));
        assert_eq!(tokens[2].span, Span::new(2, 3, 2, 4));
        assert_eq!(tokens[3].span, Span::new(2, 5, 2, 5));
    }

    #[test]
    fn test_multichar_atom_span() {
        let tokens = Lexer::new("  lambda").lex();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(1, 3, 1, 8));
    }
}
