//! Lispy tree-walking evaluator.
//!
//! Evaluates expression trees directly against a chain of environment
//! frames. There is no tail-call elimination: recursion depth in Lispy code
//! is bounded by the host stack.

pub mod builtins;
pub mod env;
pub mod evaluator;
pub mod trace;
pub mod value;

pub use builtins::{global_env, Arity, Primitive};
pub use env::Environment;
pub use evaluator::{evaluate, Evaluator, SpecialForm};
pub use trace::{LogTracer, RecordingTracer, TraceEvent, Tracer};
pub use value::{Closure, Value};

/// Result alias for evaluator operations.
pub type EvalResult<T> = lispy_types::Result<T>;
