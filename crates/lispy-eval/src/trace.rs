//! Optional step-by-step narration of evaluation.
//!
//! The evaluator reports to a [`Tracer`] when one is attached and stays
//! silent otherwise.

use crate::evaluator::SpecialForm;
use crate::value::Value;
use lispy_types::Expr;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One evaluation step. `depth` is the nesting level of the `eval` call.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// An expression is about to be evaluated.
    Eval { expr: &'a Expr, depth: usize },
    /// The expression is a special form.
    Form { form: SpecialForm, depth: usize },
    /// A procedure is applied to already-evaluated arguments.
    Apply {
        callee: &'a Value,
        args: &'a [Value],
        depth: usize,
    },
    /// An expression produced a value.
    Return { value: &'a Value, depth: usize },
}

impl TraceEvent<'_> {
    pub fn depth(&self) -> usize {
        match self {
            Self::Eval { depth, .. }
            | Self::Form { depth, .. }
            | Self::Apply { depth, .. }
            | Self::Return { depth, .. } => *depth,
        }
    }
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.depth() * 2)?;
        match self {
            Self::Eval { expr, .. } => write!(f, "eval {expr}"),
            Self::Form { form, .. } => write!(f, "form {form}"),
            Self::Apply { callee, args, .. } => {
                write!(f, "apply {callee} to (")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Return { value, .. } => write!(f, "=> {value}"),
        }
    }
}

/// A collaborator the evaluator reports each step to.
pub trait Tracer {
    fn event(&mut self, event: &TraceEvent<'_>);
}

/// Forwards every event to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn event(&mut self, event: &TraceEvent<'_>) {
        tracing::trace!(target: "lispy::eval", depth = event.depth(), "{event}");
    }
}

/// Collects rendered events.
///
/// Clones share one buffer, so a handle kept outside the evaluator sees
/// everything recorded through the attached copy.
#[derive(Debug, Default, Clone)]
pub struct RecordingTracer {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event recorded so far, one line each.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Remove and return the recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

impl Tracer for RecordingTracer {
    fn event(&mut self, event: &TraceEvent<'_>) {
        self.lines.borrow_mut().push(event.to_string());
    }
}
