//! Lexical scopes.
//!
//! An [`Environment`] is a binding table plus an optional link to the
//! scope it was created inside. `get` walks outward through that chain
//! until it finds the name or runs out of parents; `set` always writes
//! to the innermost table, which is what gives `let` its block-local
//! (never mutate-through-closure) semantics. Function calls create a
//! fresh enclosed environment per invocation so recursive and concurrent
//! calls to the same function don't share parameter bindings.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Rc<Value>>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            outer: None,
        }))
    }

    /// A child scope nested inside `outer`, used for function call
    /// frames and (once entered) `if`/block bodies.
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            outer: Some(outer),
        }))
    }

    /// Looks up `name` in this scope, then each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Rc<Value>> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Binds `name` to `value` in this scope. `let` never reaches into
    /// an outer scope to rebind an existing name; it always shadows.
    pub fn set(&mut self, name: impl Into<String>, value: Rc<Value>) {
        self.bindings.insert(name.into(), value);
    }
}
