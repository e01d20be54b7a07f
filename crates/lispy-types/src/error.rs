use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error kind, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or incomplete input, including ill-shaped special forms.
    Syntax,
    /// Lookup or `set!` of a symbol absent from the whole frame chain.
    UnboundVariable,
    /// Wrong-shape operand: `car` of an empty list, applying a number, `/` by zero.
    Type,
    /// Wrong number of arguments to a closure or primitive.
    Arity,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::UnboundVariable => write!(f, "unbound variable"),
            Self::Type => write!(f, "type"),
            Self::Arity => write!(f, "arity"),
        }
    }
}

/// Numeric error code (E100–E499).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_CLOSE: Self = Self(100);
    pub const UNEXPECTED_EOF: Self = Self(101);
    pub const TRAILING_TOKENS: Self = Self(102);
    pub const MALFORMED_FORM: Self = Self(103);

    // ── Unbound variables (E200–E299) ──
    pub const UNBOUND_VARIABLE: Self = Self(200);

    // ── Type errors (E300–E399) ──
    pub const NOT_A_PROCEDURE: Self = Self(300);
    pub const WRONG_TYPE: Self = Self(301);
    pub const EMPTY_SEQUENCE: Self = Self(302);
    pub const DIVISION_BY_ZERO: Self = Self(303);
    pub const INTEGER_OVERFLOW: Self = Self(304);

    // ── Arity errors (E400–E499) ──
    pub const WRONG_ARG_COUNT: Self = Self(400);

    /// Get the kind for this error code.
    pub fn kind(self) -> ErrorKind {
        match self.0 {
            200..=299 => ErrorKind::UnboundVariable,
            300..=399 => ErrorKind::Type,
            400..=499 => ErrorKind::Arity,
            _ => ErrorKind::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured Lispy error.
///
/// Raised at the point of detection and propagated unchanged to the caller;
/// nothing in the pipeline recovers from one locally.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{}{code} [{kind}] {message}", .span.map(|s| format!("{s}: ")).unwrap_or_default())]
pub struct LispError {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub message: String,
    /// Source location, known only for errors raised while reading.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub span: Option<Span>,
}

impl LispError {
    /// Create a new error; the kind is derived from the code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: code.kind(),
            message: message.into(),
            span: None,
        }
    }

    /// A reader or special-form shape error.
    pub fn syntax(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// A special form used with the wrong operand shape.
    pub fn malformed(form: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::MALFORMED_FORM,
            format!("malformed {form}: expected {expected}"),
        )
    }

    pub fn unbound(name: &str) -> Self {
        Self::new(
            ErrorCode::UNBOUND_VARIABLE,
            format!("unbound variable: {name}"),
        )
    }

    pub fn type_error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// `callee` expected `expected` arguments and received `got`.
    pub fn arity(callee: &str, expected: impl fmt::Display, got: usize) -> Self {
        Self::new(
            ErrorCode::WRONG_ARG_COUNT,
            format!("{callee} expects {expected} argument(s), got {got}"),
        )
    }

    /// Attach a source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::UNEXPECTED_CLOSE.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::MALFORMED_FORM.kind(), ErrorKind::Syntax);
        assert_eq!(
            ErrorCode::UNBOUND_VARIABLE.kind(),
            ErrorKind::UnboundVariable
        );
        assert_eq!(ErrorCode::DIVISION_BY_ZERO.kind(), ErrorKind::Type);
        assert_eq!(ErrorCode::WRONG_ARG_COUNT.kind(), ErrorKind::Arity);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::EMPTY_SEQUENCE), "E302");
        assert_eq!(format!("{}", ErrorCode::UNEXPECTED_EOF), "E101");
    }

    #[test]
    fn test_error_display_without_span() {
        let err = LispError::unbound("frobnicate");
        assert_eq!(
            err.to_string(),
            "E200 [unbound variable] unbound variable: frobnicate"
        );
    }

    #[test]
    fn test_error_display_with_span() {
        let err = LispError::syntax(ErrorCode::UNEXPECTED_CLOSE, "unexpected )")
            .with_span(Span::point(2, 4));
        assert_eq!(err.to_string(), "2:4: E100 [syntax] unexpected )");
    }

    #[test]
    fn test_arity_message() {
        let err = LispError::arity("car", 1, 3);
        assert_eq!(err.kind, ErrorKind::Arity);
        assert_eq!(err.message, "car expects 1 argument(s), got 3");
    }

    #[test]
    fn test_error_json_serialization() {
        let err = LispError::syntax(ErrorCode::UNEXPECTED_EOF, "unexpected end of input")
            .with_span(Span::new(1, 6, 1, 6));
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":101"));
        assert!(json.contains("\"kind\":\"syntax\""));
        assert!(json.contains("\"line\":1"));
        assert!(json.contains("\"end_column\":6"));

        let back: LispError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_error_json_omits_missing_span() {
        let json = serde_json::to_string(&LispError::unbound("x")).unwrap();
        assert!(!json.contains("span"));
        assert!(!json.contains("line"));
    }
}
