//! Statement-level translation: function declarations, `let` bindings and
//! if/else blocks.

use lispy_types::Expr;

use crate::error::{CodegenError, CodegenResult};
use crate::expr::emit_expr;
use crate::translator::Translator;

/// `true` for forms that translate to statements rather than expressions.
pub fn is_statement(form: &Expr) -> bool {
    matches!(form.head_symbol(), Some("define" | "if"))
}

/// Emit one statement.
pub fn emit_stmt(form: &Expr, t: &mut Translator<'_>) -> CodegenResult<()> {
    let operands = form
        .as_list()
        .and_then(|items| items.get(1..))
        .unwrap_or_default();
    match form.head_symbol() {
        Some("define") => emit_define(operands, t),
        Some("if") => emit_if(operands, t),
        _ => {
            let text = emit_expr(form)?;
            t.line(&format!("{text};"));
            Ok(())
        }
    }
}

fn emit_define(operands: &[Expr], t: &mut Translator<'_>) -> CodegenResult<()> {
    let [Expr::Symbol(name), value] = operands else {
        return Err(CodegenError::malformed("define", "expected (define name expr)"));
    };
    match value.as_list() {
        Some([head, lambda @ ..]) if head.as_symbol() == Some("lambda") => {
            emit_function(name, lambda, t)
        }
        _ => {
            let text = emit_expr(value)?;
            t.line(&format!("let {name} = {text};"));
            Ok(())
        }
    }
}

/// `(define name (lambda (params) body))` → `function name(params) { ... }`.
fn emit_function(name: &str, lambda: &[Expr], t: &mut Translator<'_>) -> CodegenResult<()> {
    let [Expr::List(param_exprs), body] = lambda else {
        return Err(CodegenError::malformed(
            "lambda",
            "expected (lambda (params...) body)",
        ));
    };
    let params = param_exprs
        .iter()
        .map(|p| {
            p.as_symbol().ok_or_else(|| {
                CodegenError::malformed("lambda", format!("parameter {p} is not a symbol"))
            })
        })
        .collect::<CodegenResult<Vec<_>>>()?;

    t.line(&format!("function {name}({}) {{", params.join(", ")));
    t.indent();
    emit_body(body, t)?;
    t.dedent();
    t.line("}");
    Ok(())
}

/// Emit a function body, guessing whether its value is returned.
///
/// An `if` body carries its own returns. Atoms are returned. Any other body
/// is returned only if its head symbol is bound in the root environment.
fn emit_body(body: &Expr, t: &mut Translator<'_>) -> CodegenResult<()> {
    if body.head_symbol() == Some("if") {
        return emit_stmt(body, t);
    }
    let returned = body.is_atom() || body.head_symbol().is_some_and(|head| t.root_binds(head));
    let text = emit_expr(body)?;
    if returned {
        t.line(&format!("return {text};"));
    } else {
        t.line(&format!("{text};"));
    }
    Ok(())
}

/// `(if test conseq alt)` → an if/else block returning from each branch.
fn emit_if(operands: &[Expr], t: &mut Translator<'_>) -> CodegenResult<()> {
    let [test, conseq, alt] = operands else {
        return Err(CodegenError::malformed(
            "if",
            format!("expected 3 operands, got {}", operands.len()),
        ));
    };
    t.line(&format!("if ({}) {{", emit_expr(test)?));
    t.indent();
    emit_branch(conseq, t)?;
    t.dedent();
    t.line("} else {");
    t.indent();
    emit_branch(alt, t)?;
    t.dedent();
    t.line("}");
    Ok(())
}

fn emit_branch(branch: &Expr, t: &mut Translator<'_>) -> CodegenResult<()> {
    match branch.as_list() {
        Some([head, rest @ ..]) if head.as_symbol() == Some("if") => emit_if(rest, t),
        _ => {
            t.line(&format!("return {};", emit_expr(branch)?));
            Ok(())
        }
    }
}
