//! Shared types for the Lispy interpreter.
//!
//! This crate defines the expression tree, source spans, the error type
//! and the canonical printer used by every later stage.

mod error;
mod span;
pub mod ast;

pub use ast::{render, Expr};
pub use error::{ErrorCode, ErrorKind, LispError};
pub use span::Span;

/// Result type used throughout the Lispy pipeline.
pub type Result<T> = std::result::Result<T, LispError>;
