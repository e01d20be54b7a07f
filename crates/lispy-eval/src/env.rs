//! Lexically scoped environment frames.
//!
//! Each frame holds its own bindings and a link to the enclosing frame.
//! Frames are shared by reference: a closure keeps its defining frame alive,
//! and `define`/`set!` through any handle is visible to every other holder.

use crate::value::Value;
use crate::EvalResult;
use lispy_types::LispError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A single frame.
struct Frame {
    bindings: BTreeMap<String, Value>,
    outer: Option<Environment>,
}

/// A shared handle to one frame of the scope chain.
#[derive(Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

impl Environment {
    /// Create an empty root frame.
    pub fn new() -> Self {
        Self::with_outer(BTreeMap::new(), None)
    }

    fn with_outer(bindings: BTreeMap<String, Value>, outer: Option<Environment>) -> Self {
        Self {
            frame: Rc::new(RefCell::new(Frame { bindings, outer })),
        }
    }

    /// Create a frame binding each parameter to the argument at the same
    /// position, enclosed by `outer`.
    ///
    /// The counts must match exactly.
    pub fn new_frame(params: &[String], args: Vec<Value>, outer: &Environment) -> EvalResult<Self> {
        if params.len() != args.len() {
            return Err(LispError::arity("lambda", params.len(), args.len()));
        }
        let bindings = params.iter().cloned().zip(args).collect();
        Ok(Self::with_outer(bindings, Some(outer.clone())))
    }

    /// Find the innermost frame whose own bindings contain `name`.
    pub fn lookup(&self, name: &str) -> EvalResult<Environment> {
        let mut current = self.clone();
        loop {
            let outer = {
                let frame = current.frame.borrow();
                if frame.bindings.contains_key(name) {
                    break;
                }
                frame.outer.clone()
            };
            current = outer.ok_or_else(|| LispError::unbound(name))?;
        }
        Ok(current)
    }

    /// Value of `name` in the innermost frame that binds it.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        let env = self.lookup(name)?;
        let frame = env.frame.borrow();
        frame
            .bindings
            .get(name)
            .cloned()
            .ok_or_else(|| LispError::unbound(name))
    }

    /// Overwrite an existing binding in the innermost frame that binds it.
    pub fn set(&self, name: &str, value: Value) -> EvalResult<()> {
        let env = self.lookup(name)?;
        env.frame.borrow_mut().bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Bind `name` in this frame, creating or overwriting.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.frame.borrow_mut().bindings.insert(name.into(), value);
    }

    /// `true` if this frame itself binds `name`; enclosing frames are not
    /// consulted.
    pub fn binds(&self, name: &str) -> bool {
        self.frame.borrow().bindings.contains_key(name)
    }

    /// The names bound directly in this frame, in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.frame.borrow().bindings.keys().cloned().collect()
    }

    pub fn outer(&self) -> Option<Environment> {
        self.frame.borrow().outer.clone()
    }

    pub fn is_root(&self) -> bool {
        self.frame.borrow().outer.is_none()
    }

    /// `true` if both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lispy_types::ErrorKind;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_finds_innermost_frame() {
        let root = Environment::new();
        root.define("x", Value::Int(1));
        root.define("y", Value::Int(2));
        let inner = Environment::new_frame(&names(&["x"]), vec![Value::Int(10)], &root).unwrap();

        assert!(inner.lookup("x").unwrap().ptr_eq(&inner));
        assert!(inner.lookup("y").unwrap().ptr_eq(&root));
        assert_eq!(inner.get("x").unwrap(), Value::Int(10));
        assert_eq!(root.get("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_lookup_exhausted_chain_is_unbound() {
        let root = Environment::new();
        let inner = Environment::new_frame(&[], vec![], &root).unwrap();
        let err = inner.lookup("nope").err().unwrap();
        assert_eq!(err.kind, ErrorKind::UnboundVariable);
    }

    #[test]
    fn test_set_mutates_defining_frame() {
        let root = Environment::new();
        root.define("n", Value::Int(0));
        let inner = Environment::new_frame(&[], vec![], &root).unwrap();
        inner.set("n", Value::Int(5)).unwrap();
        assert_eq!(root.get("n").unwrap(), Value::Int(5));
        assert!(!inner.binds("n"));
    }

    #[test]
    fn test_set_requires_existing_binding() {
        let root = Environment::new();
        let err = root.set("missing", Value::Int(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnboundVariable);
        assert!(!root.binds("missing"));
    }

    #[test]
    fn test_define_shadows_in_current_frame() {
        let root = Environment::new();
        root.define("x", Value::Int(1));
        let inner = Environment::new_frame(&[], vec![], &root).unwrap();
        inner.define("x", Value::Int(2));
        assert_eq!(inner.get("x").unwrap(), Value::Int(2));
        assert_eq!(root.get("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_new_frame_arity_mismatch() {
        let root = Environment::new();
        let err = Environment::new_frame(&names(&["a", "b"]), vec![Value::Int(1)], &root)
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::Arity);
    }

    #[test]
    fn test_frame_outlives_creator_handle() {
        let root = Environment::new();
        let captured = {
            let frame = Environment::new_frame(&names(&["k"]), vec![Value::Int(7)], &root).unwrap();
            frame.clone()
        };
        assert_eq!(captured.get("k").unwrap(), Value::Int(7));
        assert!(captured.outer().unwrap().ptr_eq(&root));
        assert!(root.is_root());
        assert!(!captured.is_root());
    }
}
