//! nook-parser - AST definitions and the Pratt expression parser.
//!
//! Consumes a [`nook_lexer::Lexer`] and produces an [`ast::Program`], or a
//! set of human-readable error strings if the input does not match the
//! grammar. See [`parser::Parser`] for the algorithm.

pub mod ast;
pub mod parser;

pub use ast::{Expression, Node, Program, Statement};
pub use parser::{parse, Parser, Precedence};
