//! Translator entry points and output buffer.

use lispy_types::Expr;

use crate::error::CodegenResult;
use crate::{expr, stmt};

/// Answers whether a symbol is bound in the root environment.
pub trait BindingProbe {
    fn is_bound(&self, name: &str) -> bool;
}

impl<F> BindingProbe for F
where
    F: Fn(&str) -> bool,
{
    fn is_bound(&self, name: &str) -> bool {
        self(name)
    }
}

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Translation context shared by the expression and statement emitters.
pub struct Translator<'p> {
    probe: &'p dyn BindingProbe,
    options: TranslateOptions,
    out: String,
    level: usize,
}

impl<'p> Translator<'p> {
    pub fn new(probe: &'p dyn BindingProbe, options: TranslateOptions) -> Self {
        Self {
            probe,
            options,
            out: String::new(),
            level: 0,
        }
    }

    /// `true` when the root environment binds `name`.
    pub(crate) fn root_binds(&self, name: &str) -> bool {
        self.probe.is_bound(name)
    }

    /// Append one line at the current indentation.
    pub(crate) fn line(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        let width = self.level * self.options.indent_width;
        self.out.extend(std::iter::repeat(' ').take(width));
        self.out.push_str(text);
    }

    pub(crate) fn indent(&mut self) {
        self.level += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Translate one top-level form.
    ///
    /// `define` and `if` become statements; any other form is rendered as a
    /// bare expression without a trailing semicolon.
    pub fn translate(mut self, form: &Expr) -> CodegenResult<String> {
        if stmt::is_statement(form) {
            stmt::emit_stmt(form, &mut self)?;
        } else {
            let text = expr::emit_expr(form)?;
            self.out.push_str(&text);
        }
        tracing::debug!(lines = self.out.lines().count(), "translated form");
        Ok(self.out)
    }
}

/// Translate `form` with default options.
pub fn translate(form: &Expr, probe: &dyn BindingProbe) -> CodegenResult<String> {
    translate_with_options(form, probe, TranslateOptions::default())
}

pub fn translate_with_options(
    form: &Expr,
    probe: &dyn BindingProbe,
    options: TranslateOptions,
) -> CodegenResult<String> {
    Translator::new(probe, options).translate(form)
}
