//! Lispy translator: renders expression trees as imperative source text.
//!
//! # Scope
//!
//! Translation is best-effort and covers the forms a small numeric program
//! needs: `(define name (lambda ...))`, `if`, infix arithmetic and
//! comparison, `equal?` and plain calls. Output is JavaScript-flavoured:
//!
//! ```text
//! (define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))
//!
//! function fact(n) {
//!   if ((n <= 1)) {
//!     return 1;
//!   } else {
//!     return (n * fact((n - 1)));
//!   }
//! }
//! ```
//!
//! ## Return placement
//!
//! Whether a function body is wrapped in `return` is a guess: the body is
//! returned when its head symbol is already bound in the root environment
//! (see [`BindingProbe`]). Atom bodies are always returned, and an `if`
//! body returns from each branch. The guess is wrong for bodies calling
//! procedures the root environment does not know about yet.
//!
//! The input tree is only ever borrowed.

pub mod error;
pub mod expr;
pub mod stmt;
pub mod translator;

pub use error::{CodegenError, CodegenResult};
pub use translator::{translate, translate_with_options, BindingProbe, TranslateOptions, Translator};
