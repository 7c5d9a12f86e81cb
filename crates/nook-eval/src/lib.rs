//! nook-eval - The tree-walking evaluator.
//!
//! [`eval_program`] is the public entry point: given a parsed
//! [`nook_parser::ast::Program`] and a root [`Environment`], it walks the
//! tree and returns the [`Value`] the program reduces to. Every other
//! function here handles one node kind and is named to match; reading
//! `eval.rs` top to bottom mirrors the dispatch table in the language's
//! grammar.
//!
//! Two propagation rules run underneath almost every branch below:
//!
//! - A `return` statement produces a [`Value::ReturnValue`] that must
//!   unwind through nested `if`/block bodies without being evaluated
//!   again; [`eval_block_statement`] deliberately does *not* unwrap it,
//!   so it keeps climbing until [`eval_program`] (top level) or
//!   [`apply_function`] (call boundary) strips the wrapper.
//! - A [`Value::Error`] is produced once and then passed through
//!   unchanged by every subsequent step that would otherwise recurse
//!   into it, the same way `?` short-circuits a `Result`. [`is_error`]
//!   is the guard used at each of those points.

use std::cell::RefCell;
use std::rc::Rc;

use nook_object::{native_bool, singleton_null, Environment, Value};
use nook_parser::ast::{BlockStatement, Expression, Program, Statement};

pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Rc<Value> {
    tracing::debug!(statements = program.statements.len(), "evaluating program");
    let mut result = singleton_null();
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result.as_ref() {
            Value::ReturnValue(inner) => return inner.clone(),
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Unlike [`eval_program`], does not unwrap `ReturnValue`: a `return`
/// inside a nested block must keep propagating as a `ReturnValue` so an
/// enclosing block also stops executing, all the way up to the function
/// call boundary or program top level.
fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Rc<Value> {
    let mut result = singleton_null();
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result.as_ref(), Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Rc<Value> {
    match statement {
        Statement::Expression(stmt) => eval_expression(&stmt.expression, env),
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if is_error(&value) {
                return value;
            }
            Rc::new(Value::ReturnValue(value))
        }
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if is_error(&value) {
                return value;
            }
            env.borrow_mut().set(stmt.name.value.clone(), value);
            singleton_null()
        }
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> Rc<Value> {
    match expression {
        Expression::IntegerLiteral(lit) => Rc::new(Value::Integer(lit.value)),
        Expression::BooleanLiteral(lit) => native_bool(lit.value),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(expr) => {
            let right = eval_expression(&expr.right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(&expr.operator, &right)
        }
        Expression::Infix(expr) => {
            let left = eval_expression(&expr.left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(&expr.right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(&expr.operator, &left, &right)
        }
        Expression::If(expr) => {
            let condition = eval_expression(&expr.condition, env);
            if is_error(&condition) {
                return condition;
            }
            if condition.is_truthy() {
                eval_block_statement(&expr.consequence, env)
            } else if let Some(alternative) = &expr.alternative {
                eval_block_statement(alternative, env)
            } else {
                singleton_null()
            }
        }
        Expression::FunctionLiteral(func) => Rc::new(Value::Function {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        }),
        Expression::Call(call) => {
            let function = eval_expression(&call.function, env);
            if is_error(&function) {
                return function;
            }
            let arguments = match eval_expressions(&call.arguments, env) {
                Ok(args) => args,
                Err(err) => return err,
            };
            apply_function(&function, arguments)
        }
    }
}

fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Rc<Value> {
    match env.borrow().get(name) {
        Some(value) => value,
        None => Rc::new(Value::Error(format!("identifier not found: {name}"))),
    }
}

/// Evaluates each argument in order, stopping at the first one that
/// errors so later arguments are never evaluated for their side effects.
fn eval_expressions(
    expressions: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Rc<Value>>, Rc<Value>> {
    let mut values = Vec::with_capacity(expressions.len());
    for expr in expressions {
        let value = eval_expression(expr, env);
        if is_error(&value) {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn apply_function(function: &Rc<Value>, arguments: Vec<Rc<Value>>) -> Rc<Value> {
    match function.as_ref() {
        Value::Function {
            parameters,
            body,
            env,
        } => {
            if parameters.len() != arguments.len() {
                tracing::trace!(
                    want = parameters.len(),
                    got = arguments.len(),
                    "function call arity mismatch"
                );
                return Rc::new(Value::Error(format!(
                    "wrong number of arguments: want={}, got={}",
                    parameters.len(),
                    arguments.len()
                )));
            }
            let call_env = Environment::enclosed(env.clone());
            for (param, argument) in parameters.iter().zip(arguments) {
                call_env.borrow_mut().set(param.value.clone(), argument);
            }
            let evaluated = eval_block_statement(body, &call_env);
            unwrap_return_value(evaluated)
        }
        other => Rc::new(Value::Error(format!("not a function: {}", other.type_tag()))),
    }
}

/// Strips one layer of `ReturnValue` at the call boundary: a `return`
/// inside a function body must stop *that* call, not the caller's.
fn unwrap_return_value(value: Rc<Value>) -> Rc<Value> {
    match value.as_ref() {
        Value::ReturnValue(inner) => inner.clone(),
        _ => value,
    }
}

fn eval_prefix_expression(operator: &str, right: &Rc<Value>) -> Rc<Value> {
    match operator {
        "!" => eval_bang_operator_expression(right),
        "-" => eval_minus_prefix_operator_expression(right),
        _ => Rc::new(Value::Error(format!(
            "unknown operator: {operator}{}",
            right.type_tag()
        ))),
    }
}

fn eval_bang_operator_expression(right: &Rc<Value>) -> Rc<Value> {
    native_bool(!right.is_truthy())
}

fn eval_minus_prefix_operator_expression(right: &Rc<Value>) -> Rc<Value> {
    match right.as_ref() {
        Value::Integer(v) => Rc::new(Value::Integer(v.wrapping_neg())),
        other => Rc::new(Value::Error(format!("unknown operator: -{}", other.type_tag()))),
    }
}

fn eval_infix_expression(operator: &str, left: &Rc<Value>, right: &Rc<Value>) -> Rc<Value> {
    match (left.as_ref(), right.as_ref()) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        _ if operator == "==" => native_bool(values_equal(left, right)),
        _ if operator == "!=" => native_bool(!values_equal(left, right)),
        _ if left.type_tag() != right.type_tag() => Rc::new(Value::Error(format!(
            "type mismatch: {} {} {}",
            left.type_tag(),
            operator,
            right.type_tag()
        ))),
        _ => Rc::new(Value::Error(format!(
            "unknown operator: {} {} {}",
            left.type_tag(),
            operator,
            right.type_tag()
        ))),
    }
}

/// `==`/`!=` on non-integers compare the singleton identity of the two
/// values (the only non-integer values that exist are `true`, `false`
/// and `null`, each a single shared instance).
fn values_equal(left: &Rc<Value>, right: &Rc<Value>) -> bool {
    match (left.as_ref(), right.as_ref()) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Rc<Value> {
    match operator {
        "+" => Rc::new(Value::Integer(left.wrapping_add(right))),
        "-" => Rc::new(Value::Integer(left.wrapping_sub(right))),
        "*" => Rc::new(Value::Integer(left.wrapping_mul(right))),
        "/" => Rc::new(Value::Integer(left.wrapping_div(right))),
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => Rc::new(Value::Error(format!(
            "unknown operator: INTEGER {operator} INTEGER"
        ))),
    }
}

fn is_error(value: &Rc<Value>) -> bool {
    value.is_error()
}
