//! Expression tree for Lispy.
//!
//! One node type serves as both code and list data. Nodes are immutable once
//! the reader builds them; every consumer walks them by reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved token for the boolean true literal.
pub const TRUE_LITERAL: &str = "#t";
/// Reserved token for the boolean false literal.
pub const FALSE_LITERAL: &str = "#f";

/// A symbolic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A name, resolved by environment lookup.
    Symbol(String),
    /// Integer literal: `42`, `-7`
    Int(i64),
    /// Floating-point literal: `3.14`, `1e3`
    Float(f64),
    /// `#t` / `#f`
    Bool(bool),
    /// A parenthesized sequence; `()` is the empty sequence.
    List(Vec<Expr>),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// `(quote expr)`
    pub fn quoted(expr: Expr) -> Self {
        Self::List(vec![Self::symbol("quote"), expr])
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The leading symbol of a non-empty sequence.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_list()?.first()?.as_symbol()
    }

    /// `true` for every node except a sequence.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Self::List(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

/// Canonical printer: fully parenthesized and space-separated.
///
/// Floats always print with a fractional part or exponent so that
/// reading the output back yields a float again.
pub fn render(expr: &Expr) -> String {
    expr.to_string()
}

/// Writes a float so the reader classifies it as a float again.
pub fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    write!(f, "{n:?}")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) => f.write_str(name),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write_float(f, *n),
            Self::Bool(true) => f.write_str(TRUE_LITERAL),
            Self::Bool(false) => f.write_str(FALSE_LITERAL),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(s: &str) -> Expr {
        Expr::symbol(s)
    }

    #[test]
    fn test_render_atoms() {
        assert_eq!(render(&Expr::Int(-12)), "-12");
        assert_eq!(render(&sym("set!")), "set!");
        assert_eq!(render(&Expr::Bool(true)), "#t");
        assert_eq!(render(&Expr::Bool(false)), "#f");
    }

    #[test]
    fn test_render_float_keeps_fraction() {
        assert_eq!(render(&Expr::Float(2.0)), "2.0");
        assert_eq!(render(&Expr::Float(0.25)), "0.25");
        assert_eq!(render(&Expr::Float(1e300)), "1e300");
    }

    #[test]
    fn test_render_nested_list() {
        let e = Expr::list([
            sym("define"),
            sym("sq"),
            Expr::list([
                sym("lambda"),
                Expr::list([sym("x")]),
                Expr::list([sym("*"), sym("x"), sym("x")]),
            ]),
        ]);
        assert_eq!(render(&e), "(define sq (lambda (x) (* x x)))");
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render(&Expr::List(vec![])), "()");
        assert_eq!(render(&Expr::list([Expr::List(vec![])])), "(())");
    }

    #[test]
    fn test_head_symbol() {
        let e = Expr::list([sym("if"), Expr::Int(1)]);
        assert_eq!(e.head_symbol(), Some("if"));
        assert_eq!(Expr::list([Expr::Int(1)]).head_symbol(), None);
        assert_eq!(Expr::List(vec![]).head_symbol(), None);
        assert_eq!(sym("if").head_symbol(), None);
    }

    #[test]
    fn test_quoted_builds_quote_form() {
        assert_eq!(render(&Expr::quoted(sym("a"))), "(quote a)");
    }

    #[test]
    fn test_expr_json_shape() {
        let e = Expr::list([sym("+"), Expr::Int(1), Expr::Float(2.5)]);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"list":[{"symbol":"+"},{"int":1},{"float":2.5}]}"#
        );
    }
}
