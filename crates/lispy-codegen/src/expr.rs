//! Expression-level translation.
//!
//! Every function returns the text of one expression; nothing here emits
//! statements.

use lispy_types::Expr;

use crate::error::{CodegenError, CodegenResult};

/// Operators rendered as left-associated infix chains.
pub const INFIX_OPERATORS: &[&str] = &["+", "-", "*", "/", ">", "<", ">=", "<="];

pub fn is_infix(op: &str) -> bool {
    INFIX_OPERATORS.contains(&op)
}

/// Render an expression.
pub fn emit_expr(expr: &Expr) -> CodegenResult<String> {
    match expr {
        Expr::Int(_) | Expr::Float(_) | Expr::Symbol(_) => Ok(expr.to_string()),
        Expr::Bool(b) => Ok(b.to_string()),
        Expr::List(items) => emit_form(items),
    }
}

fn emit_form(items: &[Expr]) -> CodegenResult<String> {
    let Some((head, operands)) = items.split_first() else {
        return Ok(String::new());
    };
    match head {
        Expr::Symbol(op) if is_infix(op) => emit_infix(op, operands),
        Expr::Symbol(op) if op == "equal?" => emit_equal(operands),
        Expr::Symbol(op) if is_statement_keyword(op) => Err(CodegenError::Unsupported(format!(
            "{op} in expression position"
        ))),
        Expr::Symbol(op) if matches!(op.as_str(), "quote" | "lambda" | "set!" | "begin") => {
            Err(CodegenError::Unsupported(op.clone()))
        }
        _ if head.is_number() => Err(CodegenError::Unsupported(format!(
            "numeric head {head}"
        ))),
        _ => emit_call(head, operands),
    }
}

fn is_statement_keyword(op: &str) -> bool {
    op == "if" || op == "define"
}

/// `(op a b c)` → `((a op b) op c)`.
fn emit_infix(op: &str, operands: &[Expr]) -> CodegenResult<String> {
    let rendered = operands
        .iter()
        .map(emit_expr)
        .collect::<CodegenResult<Vec<_>>>()?;
    match (op, rendered.as_slice()) {
        ("+", []) => Ok("0".to_string()),
        ("*", []) => Ok("1".to_string()),
        ("-", [only]) => Ok(format!("(- {only})")),
        ("/", [only]) => Ok(format!("(1 / {only})")),
        ("+" | "*", [only]) => Ok(only.clone()),
        (_, [first, rest @ ..]) if !rest.is_empty() => Ok(rest
            .iter()
            .fold(first.clone(), |acc, operand| format!("({acc} {op} {operand})"))),
        _ => Err(CodegenError::malformed(
            op,
            format!("expected at least 2 operands, got {}", rendered.len()),
        )),
    }
}

/// `(equal? a b)` → `(a === b)`.
fn emit_equal(operands: &[Expr]) -> CodegenResult<String> {
    let [a, b] = operands else {
        return Err(CodegenError::malformed(
            "equal?",
            format!("expected 2 operands, got {}", operands.len()),
        ));
    };
    Ok(format!("({} === {})", emit_expr(a)?, emit_expr(b)?))
}

/// `(f a b)` → `f(a, b)`.
fn emit_call(head: &Expr, operands: &[Expr]) -> CodegenResult<String> {
    let callee = emit_expr(head)?;
    let args = operands
        .iter()
        .map(emit_expr)
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(format!("{callee}({})", args.join(", ")))
}
