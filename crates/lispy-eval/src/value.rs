//! Runtime values.

use crate::builtins::Primitive;
use crate::env::Environment;
use lispy_types::ast::{write_float, FALSE_LITERAL, TRUE_LITERAL};
use lispy_types::Expr;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A Lispy runtime value.
///
/// Lists and closures are shared by reference; cloning a `Value` never
/// copies one. That sharing is what `eq?` compares.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Symbol(String),
    List(Rc<Vec<Value>>),
    Closure(Rc<Closure>),
    Primitive(Primitive),
    /// Result of `define` and `set!`; never printed by the REPL.
    Unit,
}

/// A user procedure created by `lambda`.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Expr,
    /// The frame active when the `lambda` was evaluated.
    pub env: Environment,
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(Rc::new(items))
    }

    pub fn empty_list() -> Self {
        Self::list(Vec::new())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Convert quoted code into data.
    pub fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Symbol(name) => Self::Symbol(name.clone()),
            Expr::Int(n) => Self::Int(*n),
            Expr::Float(n) => Self::Float(*n),
            Expr::Bool(b) => Self::Bool(*b),
            Expr::List(items) => Self::list(items.iter().map(Self::from_expr).collect()),
        }
    }

    /// Convert data back into an expression.
    ///
    /// Closures, primitives and `Unit` have no expression form.
    pub fn to_expr(&self) -> Option<Expr> {
        Some(match self {
            Self::Int(n) => Expr::Int(*n),
            Self::Float(n) => Expr::Float(*n),
            Self::Bool(b) => Expr::Bool(*b),
            Self::Symbol(name) => Expr::Symbol(name.clone()),
            Self::List(items) => Expr::List(
                items
                    .iter()
                    .map(Value::to_expr)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Closure(_) | Self::Primitive(_) | Self::Unit => return None,
        })
    }

    /// Only `#f` and the empty sequence are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Self::Closure(_) | Self::Primitive(_))
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Symbol(_) => "symbol",
            Self::List(_) => "list",
            Self::Closure(_) => "closure",
            Self::Primitive(_) => "primitive",
            Self::Unit => "unit",
        }
    }

    /// Deep structural equality (`equal?`).
    ///
    /// Numbers compare by numeric value across integer and float;
    /// procedures compare by identity.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                compare_int_float(*a, *b) == Some(Ordering::Equal)
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structural_eq(y))
            }
            _ => self.identical(other),
        }
    }

    /// Identity equality (`eq?`).
    ///
    /// Numbers, booleans, symbols and `Unit` have no identity of their own
    /// and compare by value. Lists, closures and primitives compare by
    /// allocation; every empty list is `eq?` to every other.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Unit, Self::Unit) => true,
            (Self::List(a), Self::List(b)) => {
                Rc::ptr_eq(a, b) || (a.is_empty() && b.is_empty())
            }
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            (Self::Primitive(a), Self::Primitive(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

/// Structural equality, but integers and floats stay distinct so that test
/// assertions can tell `6` from `6.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Int(_), Self::Float(_)) | (Self::Float(_), Self::Int(_)) => false,
            _ => self.identical(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write_float(f, *n),
            Self::Bool(true) => f.write_str(TRUE_LITERAL),
            Self::Bool(false) => f.write_str(FALSE_LITERAL),
            Self::Symbol(name) => f.write_str(name),
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
            Self::Closure(c) => write!(f, "#<lambda ({})>", c.params.join(" ")),
            Self::Primitive(p) => write!(f, "#<primitive {}>", p.name()),
            Self::Unit => f.write_str("#<unit>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Float(n) => write!(f, "Float({n:?})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Symbol(name) => write!(f, "Symbol({name:?})"),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Closure(c) => write!(f, "Closure({:?} -> {})", c.params, c.body),
            Self::Primitive(p) => write!(f, "Primitive({})", p.name()),
            Self::Unit => f.write_str("Unit"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Order an integer against a float without rounding the integer.
///
/// `None` when `f` is NaN.
pub(crate) fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63; every f64 in [-2^63, 2^63) truncates to a representable i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= BOUND {
        return Some(Ordering::Less);
    }
    if f < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    Some(i.cmp(&(whole as i64)).then_with(|| {
        if f > whole {
            Ordering::Less
        } else if f < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}
