//! Core expression evaluator.

use crate::env::Environment;
use crate::trace::{TraceEvent, Tracer};
use crate::value::{Closure, Value};
use crate::EvalResult;
use lispy_types::{ErrorCode, Expr, LispError};
use std::fmt;
use std::rc::Rc;

/// Reserved leading keywords with their own evaluation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    If,
    Set,
    Define,
    Lambda,
    Begin,
}

impl SpecialForm {
    pub fn from_symbol(name: &str) -> Option<Self> {
        Some(match name {
            "quote" => Self::Quote,
            "if" => Self::If,
            "set!" => Self::Set,
            "define" => Self::Define,
            "lambda" => Self::Lambda,
            "begin" => Self::Begin,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::If => "if",
            Self::Set => "set!",
            Self::Define => "define",
            Self::Lambda => "lambda",
            Self::Begin => "begin",
        }
    }
}

impl fmt::Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The tree-walking evaluator.
///
/// Holds no language state of its own; everything lives in the
/// environment chain passed to [`Evaluator::eval`].
#[derive(Default)]
pub struct Evaluator {
    tracer: Option<Box<dyn Tracer>>,
    /// Current `eval` nesting, reported with trace events.
    depth: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator that reports every step to `tracer`.
    pub fn with_tracer(tracer: impl Tracer + 'static) -> Self {
        Self {
            tracer: Some(Box::new(tracer)),
            depth: 0,
        }
    }

    pub fn set_tracer(&mut self, tracer: Option<Box<dyn Tracer>>) {
        self.tracer = tracer;
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    fn report(&mut self, event: TraceEvent<'_>) {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.event(&event);
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate `expr` in `env`.
    ///
    /// Errors abort the whole evaluation; bindings made before the error
    /// stay in place.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        let depth = self.depth;
        self.report(TraceEvent::Eval { expr, depth });
        self.depth += 1;
        let result = self.eval_inner(expr, env);
        self.depth = depth;
        if let Ok(value) = &result {
            self.report(TraceEvent::Return { value, depth });
        }
        result
    }

    fn eval_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Symbol(name) => env.get(name),
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            // `()` is the reserved empty-sequence literal.
            Expr::List(items) if items.is_empty() => Ok(Value::empty_list()),
            Expr::List(items) => {
                match items[0].as_symbol().and_then(SpecialForm::from_symbol) {
                    Some(form) => {
                        self.report(TraceEvent::Form {
                            form,
                            depth: self.depth,
                        });
                        self.eval_special(form, &items[1..], env)
                    }
                    None => self.eval_application(items, env),
                }
            }
        }
    }

    fn eval_special(
        &mut self,
        form: SpecialForm,
        operands: &[Expr],
        env: &Environment,
    ) -> EvalResult<Value> {
        match form {
            SpecialForm::Quote => self.eval_quote(operands),
            SpecialForm::If => self.eval_if(operands, env),
            SpecialForm::Set => self.eval_set(operands, env),
            SpecialForm::Define => self.eval_define(operands, env),
            SpecialForm::Lambda => self.eval_lambda(operands, env),
            SpecialForm::Begin => self.eval_begin(operands, env),
        }
    }

    // ── Special forms ────────────────────────────────────────────────────

    fn eval_quote(&mut self, operands: &[Expr]) -> EvalResult<Value> {
        match operands {
            [datum] => Ok(Value::from_expr(datum)),
            _ => Err(LispError::malformed("quote", "(quote datum)")),
        }
    }

    fn eval_if(&mut self, operands: &[Expr], env: &Environment) -> EvalResult<Value> {
        let [test, conseq, alt] = operands else {
            return Err(LispError::malformed("if", "(if test conseq alt)"));
        };
        let branch = if self.eval(test, env)?.is_truthy() {
            conseq
        } else {
            alt
        };
        self.eval(branch, env)
    }

    fn eval_set(&mut self, operands: &[Expr], env: &Environment) -> EvalResult<Value> {
        let [Expr::Symbol(name), value_expr] = operands else {
            return Err(LispError::malformed("set!", "(set! symbol expr)"));
        };
        let value = self.eval(value_expr, env)?;
        tracing::debug!(name = %name, value = %value, "set!");
        env.set(name, value)?;
        Ok(Value::Unit)
    }

    fn eval_define(&mut self, operands: &[Expr], env: &Environment) -> EvalResult<Value> {
        let [Expr::Symbol(name), value_expr] = operands else {
            return Err(LispError::malformed("define", "(define symbol expr)"));
        };
        let value = self.eval(value_expr, env)?;
        tracing::debug!(name = %name, value = %value, "define");
        env.define(name.clone(), value);
        Ok(Value::Unit)
    }

    fn eval_lambda(&mut self, operands: &[Expr], env: &Environment) -> EvalResult<Value> {
        const SHAPE: &str = "(lambda (params...) body)";
        let [Expr::List(param_exprs), body] = operands else {
            return Err(LispError::malformed("lambda", SHAPE));
        };
        let mut params: Vec<String> = Vec::with_capacity(param_exprs.len());
        for p in param_exprs {
            let name = p
                .as_symbol()
                .ok_or_else(|| LispError::malformed("lambda", "symbol parameters"))?;
            if params.iter().any(|existing| existing == name) {
                return Err(LispError::syntax(
                    ErrorCode::MALFORMED_FORM,
                    format!("malformed lambda: duplicate parameter {name}"),
                ));
            }
            params.push(name.to_string());
        }
        Ok(Value::Closure(Rc::new(Closure {
            params,
            body: body.clone(),
            env: env.clone(),
        })))
    }

    fn eval_begin(&mut self, operands: &[Expr], env: &Environment) -> EvalResult<Value> {
        let Some((last, init)) = operands.split_last() else {
            return Err(LispError::malformed("begin", "at least one expression"));
        };
        for expr in init {
            self.eval(expr, env)?;
        }
        self.eval(last, env)
    }

    // ── Application ──────────────────────────────────────────────────────

    fn eval_application(&mut self, items: &[Expr], env: &Environment) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(self.eval(item, env)?);
        }
        let callee = values.remove(0);
        self.apply(&callee, values)
    }

    /// Apply a procedure value to already-evaluated arguments.
    pub fn apply(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
        self.report(TraceEvent::Apply {
            callee,
            args: &args,
            depth: self.depth,
        });
        match callee {
            Value::Primitive(prim) => prim.call(&args),
            Value::Closure(closure) => {
                let frame = Environment::new_frame(&closure.params, args, &closure.env)?;
                self.eval(&closure.body, &frame)
            }
            other => Err(LispError::type_error(
                ErrorCode::NOT_A_PROCEDURE,
                format!("{} {other} is not a procedure", other.type_name()),
            )),
        }
    }
}

/// Evaluate `expr` in `env` with a fresh, untraced evaluator.
pub fn evaluate(expr: &Expr, env: &Environment) -> EvalResult<Value> {
    Evaluator::new().eval(expr, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_form_keywords_round_trip() {
        for form in [
            SpecialForm::Quote,
            SpecialForm::If,
            SpecialForm::Set,
            SpecialForm::Define,
            SpecialForm::Lambda,
            SpecialForm::Begin,
        ] {
            assert_eq!(SpecialForm::from_symbol(form.keyword()), Some(form));
        }
        assert_eq!(SpecialForm::from_symbol("let"), None);
    }

    #[test]
    fn test_depth_resets_after_error() {
        let env = Environment::new();
        let mut ev = Evaluator::new();
        let bad = Expr::list([Expr::symbol("nope"), Expr::Int(1)]);
        assert!(ev.eval(&bad, &env).is_err());
        assert_eq!(ev.depth, 0);
    }
}
