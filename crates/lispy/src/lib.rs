//! Lispy: a small Lisp interpreter and translator.
//!
//! ```text
//! source → Lexer → Parser → Expr ─┬→ Evaluator (needs an Environment) → Value
//!                                 └→ Translator → JavaScript-style text
//! ```
//!
//! The free functions cover the pipeline one stage at a time; [`Interpreter`]
//! keeps one global environment across calls, which is what the REPL uses.

mod interpreter;
pub mod repl;

pub use interpreter::{Config, Interpreter, TraceMode};
pub use lispy_codegen::{CodegenError, TranslateOptions};
pub use lispy_eval::{evaluate, global_env, Environment, Evaluator, Value};
pub use lispy_lexer::tokenize;
pub use lispy_parser::{parse, parse_all};
pub use lispy_types::{render, ErrorCode, ErrorKind, Expr, LispError};

use thiserror::Error;

/// Any error the pipeline can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lisp(#[from] LispError),
    #[error("translation failed: {0}")]
    Codegen(#[from] CodegenError),
}

impl Error {
    /// The error kind for reader and evaluator errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Lisp(e) => Some(e.kind),
            Self::Codegen(_) => None,
        }
    }
}

/// Result type for the pipeline facade.
pub type Result<T> = std::result::Result<T, Error>;

/// Translate `expr`, consulting `root` for return placement.
pub fn translate(expr: &Expr, root: &Environment) -> Result<String> {
    Ok(lispy_codegen::translate(expr, &|name: &str| root.binds(name))?)
}
