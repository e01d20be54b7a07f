//! Translator error types.

use thiserror::Error;

/// Errors that can occur during translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A form outside the translatable subset.
    #[error("unsupported form: {0}")]
    Unsupported(String),

    /// A translatable form with the wrong operand shape.
    #[error("malformed {form}: {reason}")]
    Malformed { form: String, reason: String },
}

impl CodegenError {
    pub fn malformed(form: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            form: form.to_string(),
            reason: reason.into(),
        }
    }
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
