//! A persistent read-eval session.

use lispy_codegen::TranslateOptions;
use lispy_eval::{global_env, Environment, Evaluator, LogTracer, RecordingTracer, Value};
use lispy_parser::parse_all;
use lispy_types::Expr;

use crate::Result;

/// Where evaluation steps are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Off,
    /// Forward steps to `tracing` at TRACE level.
    Log,
    /// Keep steps in memory; drain them with [`Interpreter::take_trace`].
    Record,
}

impl TraceMode {
    /// Parse `off`, `log` or `record` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "off" | "0" | "" => Some(Self::Off),
            "log" => Some(Self::Log),
            "record" | "1" => Some(Self::Record),
            _ => None,
        }
    }
}

/// Interpreter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub trace: TraceMode,
    pub translate: TranslateOptions,
}

/// One global environment plus the evaluator that runs against it.
pub struct Interpreter {
    env: Environment,
    evaluator: Evaluator,
    recorder: Option<RecordingTracer>,
    config: Config,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut interp = Self {
            env: global_env(),
            evaluator: Evaluator::new(),
            recorder: None,
            config,
        };
        interp.set_trace(config.trace);
        interp
    }

    /// The global environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_trace(&mut self, mode: TraceMode) {
        self.config.trace = mode;
        self.recorder = None;
        match mode {
            TraceMode::Off => self.evaluator.set_tracer(None),
            TraceMode::Log => self.evaluator.set_tracer(Some(Box::new(LogTracer))),
            TraceMode::Record => {
                let recorder = RecordingTracer::new();
                self.evaluator.set_tracer(Some(Box::new(recorder.clone())));
                self.recorder = Some(recorder);
            }
        }
    }

    /// Drain the steps recorded since the last call.
    pub fn take_trace(&self) -> Vec<String> {
        self.recorder
            .as_ref()
            .map(RecordingTracer::take)
            .unwrap_or_default()
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        Ok(self.evaluator.eval(expr, &self.env)?)
    }

    /// Evaluate every form in `source` in order and return the last value.
    ///
    /// Source with no forms yields `Unit`. The first error stops
    /// evaluation; earlier forms keep their effects.
    pub fn eval_str(&mut self, source: &str) -> Result<Value> {
        let forms = parse_all(source)?;
        let mut last = Value::Unit;
        for form in &forms {
            last = self.eval_expr(form)?;
        }
        Ok(last)
    }

    /// Translate every form in `source`, separated by blank lines.
    pub fn translate_str(&self, source: &str) -> Result<String> {
        let forms = parse_all(source)?;
        let env = &self.env;
        let mut chunks = Vec::with_capacity(forms.len());
        for form in &forms {
            chunks.push(lispy_codegen::translate_with_options(
                form,
                &|name: &str| env.binds(name),
                self.config.translate,
            )?);
        }
        Ok(chunks.join("\n\n"))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
