//! Atom classification.

use lispy_types::ast::{FALSE_LITERAL, TRUE_LITERAL};
use lispy_types::Expr;

/// Classify one atom token: integer, then float, then boolean, else symbol.
///
/// Float parsing is only attempted for tokens containing a digit, so
/// `inf` and `nan` read as symbols. Integers too large for `i64` read as
/// floats. A float literal that overflows to infinity, such as `1e400`,
/// reads as a symbol since no float token prints back as it.
pub fn parse_atom(text: &str) -> Expr {
    if let Ok(n) = text.parse::<i64>() {
        return Expr::Int(n);
    }
    if text.bytes().any(|b| b.is_ascii_digit()) {
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => return Expr::Float(n),
            _ => {}
        }
    }
    match text {
        TRUE_LITERAL => Expr::Bool(true),
        FALSE_LITERAL => Expr::Bool(false),
        _ => Expr::Symbol(text.to_string()),
    }
}
