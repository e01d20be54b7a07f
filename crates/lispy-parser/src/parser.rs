//! Recursive-descent reader over a token cursor.

use lispy_lexer::{Lexer, Token, TokenKind};
use lispy_types::{ErrorCode, Expr, LispError, Result, Span};

use crate::atom::parse_atom;

/// The Lispy reader.
///
/// Consumes tokens from the front of its stream, one expression per call to
/// [`Parser::read`]. Nesting depth is bounded only by the call stack.
pub struct Parser {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Lex `source` and create a parser over its tokens.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).lex())
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    /// Returns `true` once every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span just past the last token, for end-of-input errors.
    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| Span::point(t.span.end_line, t.span.end_col + 1))
            .unwrap_or_else(|| Span::point(1, 1))
    }

    fn unexpected_eof(&self) -> LispError {
        LispError::syntax(ErrorCode::UNEXPECTED_EOF, "unexpected end of input")
            .with_span(self.end_span())
    }

    // ── Reading ───────────────────────────────────────────────────────────────

    /// Read one expression from the front of the stream.
    pub fn read(&mut self) -> Result<Expr> {
        let token = self.advance().ok_or_else(|| self.unexpected_eof())?;
        match token.kind {
            TokenKind::LParen => self.read_list(),
            TokenKind::RParen => Err(LispError::syntax(
                ErrorCode::UNEXPECTED_CLOSE,
                "unexpected )",
            )
            .with_span(token.span)),
            TokenKind::Atom(text) => Ok(parse_atom(&text)),
        }
    }

    /// Read sequence elements up to and including the matching `)`.
    fn read_list(&mut self) -> Result<Expr> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_eof()),
                Some(t) if t.kind == TokenKind::RParen => {
                    self.advance();
                    return Ok(Expr::List(items));
                }
                Some(_) => items.push(self.read()?),
            }
        }
    }

    /// Read exactly one expression and require that nothing follows it.
    pub fn read_single(&mut self) -> Result<Expr> {
        let expr = self.read()?;
        if let Some(extra) = self.peek() {
            return Err(LispError::syntax(
                ErrorCode::TRAILING_TOKENS,
                format!("unexpected '{}' after complete expression", extra.kind),
            )
            .with_span(extra.span));
        }
        Ok(expr)
    }

    /// Read every remaining expression in order.
    pub fn read_all(&mut self) -> Result<Vec<Expr>> {
        let mut exprs = Vec::new();
        while !self.at_end() {
            exprs.push(self.read()?);
        }
        Ok(exprs)
    }
}

/// Parse exactly one top-level form; trailing tokens are a syntax error.
pub fn parse(source: &str) -> Result<Expr> {
    Parser::from_source(source).read_single()
}

/// Parse every top-level form in `source`.
pub fn parse_all(source: &str) -> Result<Vec<Expr>> {
    Parser::from_source(source).read_all()
}
