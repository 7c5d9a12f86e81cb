//! The runtime value representation.
//!
//! Every value the evaluator produces or consumes is a [`Value`]. Three
//! variants exist purely to make the evaluator's own control flow
//! visible in the type system rather than threaded through side
//! channels:
//!
//! - [`Value::ReturnValue`] wraps the operand of a `return` so it can be
//!   unwound through nested blocks without an early `return` from the
//!   Rust call stack itself; see the evaluator crate for how it is
//!   unwrapped at function-call boundaries.
//! - [`Value::Error`] is a first-class poison value. Once produced it
//!   propagates through every subsequent evaluation step unchanged,
//!   the same way a `Result::Err` would, but it has to flow through the
//!   same `Rc<Value>` channel as ordinary values because blocks can
//!   return either.
//! - [`Value::Function`] captures its defining [`Environment`] by
//!   reference, which is what gives closures their closure.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use nook_parser::ast::{BlockStatement, Identifier};

use crate::environment::Environment;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    /// The operand of a `return` statement, still in flight.
    ReturnValue(Rc<Value>),
    /// A runtime error, carrying a human-readable message.
    Error(String),
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<RefCell<Environment>>,
    },
}

impl Value {
    /// The type name used in error messages (`"type mismatch: INTEGER +
    /// BOOLEAN"`) and by anything that needs to branch on runtime type.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function { .. } => "FUNCTION",
        }
    }

    /// The human-facing rendering used by the REPL and `Inspect`-style
    /// debugging: integers and booleans print their literal value,
    /// errors are prefixed with `ERROR: `, and functions reprint their
    /// own source.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::Null => "null".to_string(),
            Value::ReturnValue(v) => v.inspect(),
            Value::Error(msg) => format!("ERROR: {msg}"),
            Value::Function { parameters, body, .. } => {
                let params: Vec<String> = parameters.iter().map(|p| p.value.clone()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), body.string())
            }
        }
    }

    /// Every value is truthy except `false` and `null`; this is the
    /// language's one coercion rule, used by `if` conditions.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

thread_local! {
    static TRUE: Rc<Value> = Rc::new(Value::Boolean(true));
    static FALSE: Rc<Value> = Rc::new(Value::Boolean(false));
    static NULL: Rc<Value> = Rc::new(Value::Null);
}

/// The shared `true` singleton. The evaluator never allocates a fresh
/// `Boolean(true)`; it always hands out this one, the same way the
/// interpreter this one is modeled on compares booleans by identity.
pub fn singleton_true() -> Rc<Value> {
    TRUE.with(|v| v.clone())
}

pub fn singleton_false() -> Rc<Value> {
    FALSE.with(|v| v.clone())
}

pub fn singleton_null() -> Rc<Value> {
    NULL.with(|v| v.clone())
}

/// Maps a native `bool` to the matching singleton, avoiding an
/// allocation on every comparison result.
pub fn native_bool(value: bool) -> Rc<Value> {
    if value {
        singleton_true()
    } else {
        singleton_false()
    }
}
