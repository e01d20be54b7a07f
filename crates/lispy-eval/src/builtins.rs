//! The primitive library installed into the root frame.

use crate::env::Environment;
use crate::value::{compare_int_float, Value};
use crate::EvalResult;
use lispy_types::{ErrorCode, LispError};
use std::cmp::Ordering;
use std::fmt;

/// Argument-count contract of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exact(k) => n == k,
            Self::AtLeast(k) => n >= k,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(k) => write!(f, "{k}"),
            Self::AtLeast(k) => write!(f, "at least {k}"),
            Self::Any => write!(f, "any number of"),
        }
    }
}

type PrimitiveFn = fn(&[Value]) -> EvalResult<Value>;

/// A host-implemented procedure.
#[derive(Clone, Copy)]
pub struct Primitive {
    name: &'static str,
    arity: Arity,
    func: PrimitiveFn,
}

impl Primitive {
    pub const fn new(name: &'static str, arity: Arity, func: PrimitiveFn) -> Self {
        Self { name, arity, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Check the argument count, then run the primitive.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        if !self.arity.accepts(args.len()) {
            return Err(LispError::arity(self.name, self.arity, args.len()));
        }
        (self.func)(args)
    }
}

/// Every primitive, in installation order.
pub const PRIMITIVES: &[Primitive] = &[
    Primitive::new("+", Arity::Any, add),
    Primitive::new("-", Arity::AtLeast(1), sub),
    Primitive::new("*", Arity::Any, mul),
    Primitive::new("/", Arity::AtLeast(1), div),
    Primitive::new(">", Arity::Exact(2), gt),
    Primitive::new("<", Arity::Exact(2), lt),
    Primitive::new(">=", Arity::Exact(2), ge),
    Primitive::new("<=", Arity::Exact(2), le),
    Primitive::new("=", Arity::Exact(2), num_eq),
    Primitive::new("not", Arity::Exact(1), not),
    Primitive::new("equal?", Arity::Exact(2), equal),
    Primitive::new("eq?", Arity::Exact(2), eq),
    Primitive::new("length", Arity::Exact(1), length),
    Primitive::new("cons", Arity::Exact(2), cons),
    Primitive::new("car", Arity::Exact(1), car),
    Primitive::new("cdr", Arity::Exact(1), cdr),
    Primitive::new("append", Arity::Any, append),
    Primitive::new("list", Arity::Any, list),
    Primitive::new("list?", Arity::Exact(1), is_list),
    Primitive::new("null?", Arity::Exact(1), is_null),
    Primitive::new("symbol?", Arity::Exact(1), is_symbol),
    Primitive::new("number?", Arity::Exact(1), is_number),
    Primitive::new("procedure?", Arity::Exact(1), is_procedure),
];

/// Bind every primitive into `env`.
pub fn install(env: &Environment) {
    for prim in PRIMITIVES {
        env.define(prim.name, Value::Primitive(*prim));
    }
}

/// Create a fresh root frame holding the primitive library.
pub fn global_env() -> Environment {
    let env = Environment::new();
    install(&env);
    env
}

// ══════════════════════════════════════════════════════════════════════════════
// Numbers
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn from_value(v: &Value, op: &str) -> EvalResult<Self> {
        match v {
            Value::Int(n) => Ok(Self::Int(*n)),
            Value::Float(n) => Ok(Self::Float(*n)),
            other => Err(LispError::type_error(
                ErrorCode::WRONG_TYPE,
                format!("{op} expects numbers, got {} {other}", other.type_name()),
            )),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Float(n) => n == 0.0,
        }
    }
}

impl From<Num> for Value {
    fn from(n: Num) -> Self {
        match n {
            Num::Int(n) => Value::Int(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

fn overflow(op: &str) -> LispError {
    LispError::type_error(ErrorCode::INTEGER_OVERFLOW, format!("integer overflow in {op}"))
}

/// Apply an integer op with overflow checking, or the float op if either
/// side is a float.
fn arith(
    op: &str,
    a: Num,
    b: Num,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => int_op(x, y).map(Num::Int).ok_or_else(|| overflow(op)),
        _ => Ok(Num::Float(float_op(a.as_f64(), b.as_f64()))),
    }
}

fn divide(a: Num, b: Num) -> EvalResult<Num> {
    if b.is_zero() {
        return Err(LispError::type_error(
            ErrorCode::DIVISION_BY_ZERO,
            "division by zero",
        ));
    }
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => match x.checked_rem(y) {
            Some(0) => x.checked_div(y).map(Num::Int).ok_or_else(|| overflow("/")),
            Some(_) => Ok(Num::Float(x as f64 / y as f64)),
            None => Err(overflow("/")),
        },
        _ => Ok(Num::Float(a.as_f64() / b.as_f64())),
    }
}

fn numbers(args: &[Value], op: &str) -> EvalResult<Vec<Num>> {
    args.iter().map(|v| Num::from_value(v, op)).collect()
}

fn fold(
    args: &[Value],
    op: &str,
    init: Num,
    step: impl Fn(Num, Num) -> EvalResult<Num>,
) -> EvalResult<Value> {
    let mut acc = init;
    for n in numbers(args, op)? {
        acc = step(acc, n)?;
    }
    Ok(acc.into())
}

fn add(args: &[Value]) -> EvalResult<Value> {
    fold(args, "+", Num::Int(0), |a, b| {
        arith("+", a, b, i64::checked_add, |x, y| x + y)
    })
}

fn mul(args: &[Value]) -> EvalResult<Value> {
    fold(args, "*", Num::Int(1), |a, b| {
        arith("*", a, b, i64::checked_mul, |x, y| x * y)
    })
}

fn sub(args: &[Value]) -> EvalResult<Value> {
    let nums = numbers(args, "-")?;
    let sub = |a, b| arith("-", a, b, i64::checked_sub, |x, y| x - y);
    match nums.as_slice() {
        [only] => sub(Num::Int(0), *only).map(Value::from),
        [first, rest @ ..] => {
            let mut acc = *first;
            for n in rest {
                acc = sub(acc, *n)?;
            }
            Ok(acc.into())
        }
        [] => Err(LispError::arity("-", Arity::AtLeast(1), 0)),
    }
}

fn div(args: &[Value]) -> EvalResult<Value> {
    let nums = numbers(args, "/")?;
    match nums.as_slice() {
        [only] => divide(Num::Int(1), *only).map(Value::from),
        [first, rest @ ..] => {
            let mut acc = *first;
            for n in rest {
                acc = divide(acc, *n)?;
            }
            Ok(acc.into())
        }
        [] => Err(LispError::arity("/", Arity::AtLeast(1), 0)),
    }
}

fn compare(args: &[Value], op: &str, test: fn(Ordering) -> bool) -> EvalResult<Value> {
    let a = Num::from_value(&args[0], op)?;
    let b = Num::from_value(&args[1], op)?;
    let ordering = match (a, b) {
        (Num::Int(x), Num::Int(y)) => Some(x.cmp(&y)),
        (Num::Int(x), Num::Float(y)) => compare_int_float(x, y),
        (Num::Float(x), Num::Int(y)) => compare_int_float(y, x).map(Ordering::reverse),
        (Num::Float(x), Num::Float(y)) => x.partial_cmp(&y),
    };
    // NaN compares false with everything.
    Ok(Value::Bool(ordering.is_some_and(test)))
}

fn gt(args: &[Value]) -> EvalResult<Value> {
    compare(args, ">", |o| o.is_gt())
}

fn lt(args: &[Value]) -> EvalResult<Value> {
    compare(args, "<", |o| o.is_lt())
}

fn ge(args: &[Value]) -> EvalResult<Value> {
    compare(args, ">=", |o| o.is_ge())
}

fn le(args: &[Value]) -> EvalResult<Value> {
    compare(args, "<=", |o| o.is_le())
}

fn num_eq(args: &[Value]) -> EvalResult<Value> {
    compare(args, "=", |o| o.is_eq())
}

// ══════════════════════════════════════════════════════════════════════════════
// Logic & equality
// ══════════════════════════════════════════════════════════════════════════════

fn not(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(!args[0].is_truthy()))
}

fn equal(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].structural_eq(&args[1])))
}

fn eq(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].identical(&args[1])))
}

// ══════════════════════════════════════════════════════════════════════════════
// Lists
// ══════════════════════════════════════════════════════════════════════════════

fn expect_list<'a>(v: &'a Value, op: &str) -> EvalResult<&'a [Value]> {
    v.as_list().ok_or_else(|| {
        LispError::type_error(
            ErrorCode::WRONG_TYPE,
            format!("{op} expects a list, got {} {v}", v.type_name()),
        )
    })
}

fn length(args: &[Value]) -> EvalResult<Value> {
    let items = expect_list(&args[0], "length")?;
    i64::try_from(items.len())
        .map(Value::Int)
        .map_err(|_| overflow("length"))
}

fn cons(args: &[Value]) -> EvalResult<Value> {
    let tail = expect_list(&args[1], "cons")?;
    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(args[0].clone());
    items.extend_from_slice(tail);
    Ok(Value::list(items))
}

fn car(args: &[Value]) -> EvalResult<Value> {
    expect_list(&args[0], "car")?
        .first()
        .cloned()
        .ok_or_else(|| {
            LispError::type_error(ErrorCode::EMPTY_SEQUENCE, "empty sequence has no head")
        })
}

fn cdr(args: &[Value]) -> EvalResult<Value> {
    match expect_list(&args[0], "cdr")? {
        [] => Err(LispError::type_error(
            ErrorCode::EMPTY_SEQUENCE,
            "empty sequence has no tail",
        )),
        [_, rest @ ..] => Ok(Value::list(rest.to_vec())),
    }
}

fn append(args: &[Value]) -> EvalResult<Value> {
    let mut items = Vec::new();
    for arg in args {
        items.extend_from_slice(expect_list(arg, "append")?);
    }
    Ok(Value::list(items))
}

fn list(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::list(args.to_vec()))
}

// ══════════════════════════════════════════════════════════════════════════════
// Type predicates
// ══════════════════════════════════════════════════════════════════════════════

fn is_list(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::List(_))))
}

fn is_null(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_list().is_some_and(|items| items.is_empty())))
}

fn is_symbol(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Symbol(_))))
}

fn is_number(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Int(_) | Value::Float(_))))
}

fn is_procedure(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].is_procedure()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lispy_types::ErrorKind;

    fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
        let prim = PRIMITIVES
            .iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| panic!("no primitive {name}"));
        prim.call(args)
    }

    fn ints(ns: &[i64]) -> Vec<Value> {
        ns.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = PRIMITIVES.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRIMITIVES.len());
    }

    #[test]
    fn test_add_and_mul_identities() {
        assert_eq!(call("+", &[]).unwrap(), Value::Int(0));
        assert_eq!(call("*", &[]).unwrap(), Value::Int(1));
        assert_eq!(call("+", &ints(&[1, 2, 3])).unwrap(), Value::Int(6));
        assert_eq!(call("*", &ints(&[2, 3, 4])).unwrap(), Value::Int(24));
    }

    #[test]
    fn test_float_contagion() {
        assert_eq!(
            call("+", &[Value::Int(1), Value::Float(0.5)]).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_sub_negates_single_argument() {
        assert_eq!(call("-", &ints(&[5])).unwrap(), Value::Int(-5));
        assert_eq!(call("-", &ints(&[10, 3, 2])).unwrap(), Value::Int(5));
        assert_eq!(call("-", &[]).unwrap_err().kind, ErrorKind::Arity);
    }

    #[test]
    fn test_div_inverts_and_reduces() {
        assert_eq!(call("/", &ints(&[4])).unwrap(), Value::Float(0.25));
        assert_eq!(call("/", &ints(&[1])).unwrap(), Value::Int(1));
        assert_eq!(call("/", &ints(&[12, 2, 3])).unwrap(), Value::Int(2));
        assert_eq!(call("/", &ints(&[7, 2])).unwrap(), Value::Float(3.5));
    }

    #[test]
    fn test_division_by_zero_is_type_error() {
        let err = call("/", &ints(&[1, 0])).unwrap_err();
        assert_eq!(err.code, ErrorCode::DIVISION_BY_ZERO);
        assert_eq!(err.kind, ErrorKind::Type);
        let err = call("/", &[Value::Float(1.0), Value::Float(0.0)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DIVISION_BY_ZERO);
        assert_eq!(call("/", &ints(&[0])).unwrap_err().code, ErrorCode::DIVISION_BY_ZERO);
    }

    #[test]
    fn test_integer_overflow_is_reported() {
        let err = call("+", &[Value::Int(i64::MAX), Value::Int(1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::INTEGER_OVERFLOW);
        let err = call("-", &[Value::Int(i64::MIN)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::INTEGER_OVERFLOW);
        let err = call("/", &[Value::Int(i64::MIN), Value::Int(-1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::INTEGER_OVERFLOW);
    }

    #[test]
    fn test_arithmetic_rejects_non_numbers() {
        let err = call("+", &[Value::Int(1), Value::symbol("a")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::WRONG_TYPE);
    }

    #[test]
    fn test_comparisons_need_two_numbers() {
        assert_eq!(call("<", &ints(&[1, 2])).unwrap(), Value::Bool(true));
        assert_eq!(call(">=", &[Value::Int(2), Value::Float(2.0)]).unwrap(), Value::Bool(true));
        assert_eq!(call("=", &ints(&[3, 4])).unwrap(), Value::Bool(false));
        assert_eq!(call("<", &ints(&[1, 2, 3])).unwrap_err().kind, ErrorKind::Arity);
        assert_eq!(
            call("<", &[Value::Float(f64::NAN), Value::Int(1)]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_car_cdr_of_empty_sequence() {
        let empty = [Value::empty_list()];
        let err = call("car", &empty).unwrap_err();
        assert_eq!(err.code, ErrorCode::EMPTY_SEQUENCE);
        assert_eq!(err.message, "empty sequence has no head");
        let err = call("cdr", &empty).unwrap_err();
        assert_eq!(err.message, "empty sequence has no tail");
        assert_eq!(call("car", &ints(&[1])).unwrap_err().code, ErrorCode::WRONG_TYPE);
    }

    #[test]
    fn test_list_primitives() {
        let l = call("list", &ints(&[1, 2, 3])).unwrap();
        assert_eq!(call("length", &[l.clone()]).unwrap(), Value::Int(3));
        assert_eq!(call("car", &[l.clone()]).unwrap(), Value::Int(1));
        assert_eq!(call("cdr", &[l.clone()]).unwrap(), Value::list(ints(&[2, 3])));
        assert_eq!(
            call("cons", &[Value::Int(0), l.clone()]).unwrap(),
            Value::list(ints(&[0, 1, 2, 3]))
        );
        assert_eq!(
            call("append", &[l.clone(), Value::list(ints(&[4]))]).unwrap(),
            Value::list(ints(&[1, 2, 3, 4]))
        );
        assert_eq!(call("append", &[]).unwrap(), Value::empty_list());
        assert_eq!(
            call("cons", &ints(&[1, 2])).unwrap_err().code,
            ErrorCode::WRONG_TYPE
        );
    }

    #[test]
    fn test_predicates() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(call("list?", &[Value::empty_list()]).unwrap(), t);
        assert_eq!(call("list?", &ints(&[1])).unwrap(), f);
        assert_eq!(call("null?", &[Value::empty_list()]).unwrap(), t);
        assert_eq!(call("null?", &[Value::list(ints(&[1]))]).unwrap(), f);
        assert_eq!(call("null?", &ints(&[0])).unwrap(), f);
        assert_eq!(call("symbol?", &[Value::symbol("a")]).unwrap(), t);
        assert_eq!(call("number?", &[Value::Float(1.0)]).unwrap(), t);
        assert_eq!(call("not", &[f.clone()]).unwrap(), t);
        assert_eq!(call("not", &ints(&[0])).unwrap(), f);
        let plus = Value::Primitive(PRIMITIVES[0]);
        assert_eq!(call("procedure?", &[plus]).unwrap(), t);
    }

    #[test]
    fn test_global_env_binds_every_primitive() {
        let env = global_env();
        for prim in PRIMITIVES {
            assert!(env.binds(prim.name()), "missing {}", prim.name());
        }
        assert!(env.is_root());
    }
}
