//! AST node definitions.
//!
//! The source language's AST is genuinely polymorphic (a `Call`'s callee
//! may be an `Identifier` or a `FunctionLiteral`; an `If`'s alternative
//! is optional). Rather than model that with trait objects, every family
//! is a tagged `enum` — [`Statement`] and [`Expression`] — so that every
//! visitor (the parser's own `string()` reprinting, the evaluator's
//! `eval`) is an exhaustive `match` the compiler checks for us.
//!
//! Every node keeps the [`Token`] that introduced it so `token_literal`
//! is free; `string()` reproduces a canonical, fully-parenthesized
//! reprint of the parsed tree (used by the parser's own test suite to
//! assert precedence and associativity).

use std::fmt;

use nook_lexer::Token;

/// Common capability shared by every statement and expression node.
pub trait Node {
    /// The literal text of the token that introduced this node.
    fn token_literal(&self) -> &str;
}

/// The root of every parse: an ordered sequence of top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|s| s.token_literal())
            .unwrap_or("")
    }

    /// Canonical reprint: each statement's `string()`, concatenated
    /// without separators.
    pub fn string(&self) -> String {
        self.statements.iter().map(|s| s.string()).collect()
    }
}

/// An identifier, e.g. `x` in `let x = 5;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn string(&self) -> String {
        self.value.clone()
    }
}

// ---------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let(s) => &s.token.literal,
            Statement::Return(s) => &s.token.literal,
            Statement::Expression(s) => &s.token.literal,
            Statement::Block(s) => &s.token.literal,
        }
    }

    pub fn string(&self) -> String {
        match self {
            Statement::Let(s) => s.string(),
            Statement::Return(s) => s.string(),
            Statement::Expression(s) => s.string(),
            Statement::Block(s) => s.string(),
        }
    }
}

/// `let IDENT = EXPR;`
#[derive(Debug, Clone)]
pub struct LetStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl LetStatement {
    pub fn string(&self) -> String {
        format!(
            "{} {} = {};",
            self.token.literal,
            self.name.string(),
            self.value.string()
        )
    }
}

/// `return EXPR;`
#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Expression,
}

impl ReturnStatement {
    pub fn string(&self) -> String {
        format!("{} {};", self.token.literal, self.value.string())
    }
}

/// An expression used in statement position, e.g. a bare call or
/// arithmetic expression on its own line.
#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

impl ExpressionStatement {
    pub fn string(&self) -> String {
        self.expression.string()
    }
}

/// `{ statement* }` — the body of an `if`/`else` arm or function.
#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn string(&self) -> String {
        self.statements.iter().map(|s| s.string()).collect()
    }
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    BooleanLiteral(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    FunctionLiteral(FunctionLiteral),
    Call(CallExpression),
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(e) => &e.token.literal,
            Expression::IntegerLiteral(e) => &e.token.literal,
            Expression::BooleanLiteral(e) => &e.token.literal,
            Expression::Prefix(e) => &e.token.literal,
            Expression::Infix(e) => &e.token.literal,
            Expression::If(e) => &e.token.literal,
            Expression::FunctionLiteral(e) => &e.token.literal,
            Expression::Call(e) => &e.token.literal,
        }
    }

    pub fn string(&self) -> String {
        match self {
            Expression::Identifier(e) => e.string(),
            Expression::IntegerLiteral(e) => e.string(),
            Expression::BooleanLiteral(e) => e.string(),
            Expression::Prefix(e) => e.string(),
            Expression::Infix(e) => e.string(),
            Expression::If(e) => e.string(),
            Expression::FunctionLiteral(e) => e.string(),
            Expression::Call(e) => e.string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl IntegerLiteral {
    pub fn string(&self) -> String {
        self.token.literal.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl BooleanLiteral {
    pub fn string(&self) -> String {
        self.token.literal.clone()
    }
}

/// `!right` or `-right`.
#[derive(Debug, Clone)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

impl PrefixExpression {
    pub fn string(&self) -> String {
        format!("({}{})", self.operator, self.right.string())
    }
}

/// `left OP right`.
#[derive(Debug, Clone)]
pub struct InfixExpression {
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl InfixExpression {
    pub fn string(&self) -> String {
        format!(
            "({} {} {})",
            self.left.string(),
            self.operator,
            self.right.string()
        )
    }
}

/// `if (COND) { CONSEQUENCE } else { ALTERNATIVE }` — `alternative` is
/// `None` when there is no `else` arm.
#[derive(Debug, Clone)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl IfExpression {
    pub fn string(&self) -> String {
        let mut out = format!(
            "if{} {}",
            self.condition.string(),
            self.consequence.string()
        );
        if let Some(alt) = &self.alternative {
            out.push_str("else ");
            out.push_str(&alt.string());
        }
        out
    }
}

/// `fn(params) { body }`.
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl FunctionLiteral {
    pub fn string(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.string()).collect();
        format!(
            "{}({}){}",
            self.token.literal,
            params.join(", "),
            self.body.string()
        )
    }
}

/// `function(args)` — `function` may be an `Identifier` or an inline
/// `FunctionLiteral` (immediately-invoked function expression).
#[derive(Debug, Clone)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl CallExpression {
    pub fn string(&self) -> String {
        let args: Vec<String> = self.arguments.iter().map(|a| a.string()).collect();
        format!("{}({})", self.function.string(), args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nook_lexer::TokenKind;

    #[test]
    fn let_statement_reprints_with_trailing_semicolon() {
        let stmt = Statement::Let(LetStatement {
            token: Token::new(TokenKind::Let, "let"),
            name: Identifier {
                token: Token::new(TokenKind::Ident, "myVar"),
                value: "myVar".to_string(),
            },
            value: Expression::Identifier(Identifier {
                token: Token::new(TokenKind::Ident, "anotherVar"),
                value: "anotherVar".to_string(),
            }),
        });
        assert_eq!(stmt.string(), "let myVar = anotherVar;");
    }
}
