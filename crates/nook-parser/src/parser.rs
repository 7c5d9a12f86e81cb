//! Pratt parser.
//!
//! The parser pulls tokens from a [`Lexer`] one at a time and keeps two
//! of them in view, `current_token` and `peek_token`, advancing both
//! with [`Parser::next_token`]. Expression parsing is table-driven: each
//! [`TokenKind`] that can start an expression has a *prefix* parse
//! function, and each one that can continue an expression (a binary
//! operator) has an *infix* parse function plus a binding [`Precedence`].
//! `parse_expression` loops, calling the current token's infix function
//! as long as its precedence outranks the precedence threshold passed
//! in, which is how `a + b * c` ends up grouped as `(a + (b * c))`
//! without an explicit grammar rule for every precedence level.
//!
//! Parse errors do not abort parsing: they accumulate in `errors` so a
//! single call surfaces every problem in the input, not just the first.

use nook_lexer::{Lexer, Token, TokenKind};

use crate::ast::{
    BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement,
    FunctionLiteral, Identifier, IfExpression, InfixExpression, IntegerLiteral, LetStatement,
    PrefixExpression, Program, ReturnStatement, Statement,
};

/// Operator binding strength, weakest to strongest. Derived straight from
/// the language's grammar: equality binds loosest, a function call
/// binds tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // fn(x)
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Equal | TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan | TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::LeftParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    pub fn from_source(source: &str) -> Self {
        Parser::new(Lexer::new(source))
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_token(&mut self) {
        std::mem::swap(&mut self.current_token, &mut self.peek_token);
        self.peek_token = self.lexer.next_token();
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek_token.kind)
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current_token.kind)
    }

    /// If `peek_token` has kind `kind`, consumes it (advancing so it
    /// becomes `current_token`) and returns `true`. Otherwise records an
    /// error and returns `false` without advancing.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.errors.push(format!(
                "expected next token to be {}, got {} instead",
                kind.name(),
                self.peek_token.kind.name()
            ));
            false
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let let_token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Let(LetStatement {
            token: let_token,
            name,
            value,
        }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let return_token = self.current_token.clone();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Return(ReturnStatement {
            token: return_token,
            value,
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current_token.clone();
        let mut statements = Vec::new();
        self.next_token();

        while !self.current_is(TokenKind::RightBrace) && !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    /// The heart of the Pratt parser: parse a prefix expression, then
    /// keep folding in infix operators as long as the next one binds
    /// tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            left = match self.peek_token.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessThan
                | TokenKind::GreaterThan => {
                    self.next_token();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LeftParen => {
                    self.next_token();
                    self.parse_call_expression(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current_token.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier {
                token: self.current_token.clone(),
                value: self.current_token.literal.clone(),
            })),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::True | TokenKind::False => Some(Expression::BooleanLiteral(BooleanLiteral {
                token: self.current_token.clone(),
                value: self.current_is(TokenKind::True),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LeftParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            other => {
                self.errors
                    .push(format!("no prefix parse function for {} found", other.name()));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral { token, value })),
            Err(_) => {
                self.errors
                    .push(format!("could not parse {:?} as integer", token.literal));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();
        let operator = token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current_token.clone();
        let operator = token.literal.clone();
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LeftParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LeftBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LeftBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LeftParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LeftBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut identifiers = Vec::new();

        if self.peek_is(TokenKind::RightParen) {
            self.next_token();
            return Some(identifiers);
        }

        self.next_token();
        identifiers.push(Identifier {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        });

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            identifiers.push(Identifier {
                token: self.current_token.clone(),
                value: self.current_token.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current_token.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = Vec::new();

        if self.peek_is(TokenKind::RightParen) {
            self.next_token();
            return Some(args);
        }

        self.next_token();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }

        Some(args)
    }
}

/// Parses `source` to completion and returns the program together with
/// any accumulated errors (empty on success).
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "parser errors: {errors:?}");
        program
    }

    #[test]
    fn parses_let_statements() {
        let program = parse_ok("let x = 5;\nlet y = true;\nlet foobar = y;");
        assert_eq!(program.statements.len(), 3);
        for (stmt, expected_name) in program.statements.iter().zip(["x", "y", "foobar"]) {
            match stmt {
                Statement::Let(let_stmt) => assert_eq!(let_stmt.name.value, expected_name),
                other => panic!("expected let statement, got {other:?}"),
            }
        }
    }

    #[test]
    fn parses_return_statements() {
        let program = parse_ok("return 5;\nreturn 10;\nreturn 993322;");
        assert_eq!(program.statements.len(), 3);
        for stmt in &program.statements {
            assert!(matches!(stmt, Statement::Return(_)));
        }
    }

    #[test]
    fn reports_a_missing_assign_token() {
        let (_, errors) = parse("let x 5;");
        assert_eq!(
            errors,
            vec!["expected next token to be Assign, got Int instead".to_string()]
        );
    }

    #[test]
    fn prefix_expression_binds_tighter_than_product() {
        let program = parse_ok("-a * b;");
        assert_eq!(program.string(), "((-a) * b)");
    }

    #[test]
    fn bang_prefix_reprints_correctly() {
        let program = parse_ok("!-a;");
        assert_eq!(program.string(), "(!(-a))");
    }

    #[test]
    fn operator_precedence_reprints_match_expectations() {
        let cases = [
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f)",
            ),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
        ];
        for (input, expected) in cases {
            let program = parse_ok(input);
            assert_eq!(program.string(), expected, "input: {input}");
        }
    }

    #[test]
    fn call_expression_reprints_nested_arguments() {
        let program = parse_ok("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));");
        assert_eq!(
            program.string(),
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"
        );
    }

    #[test]
    fn if_expression_without_else_parses() {
        let program = parse_ok("if (x < y) { x }");
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::If(if_expr) => {
                    assert!(if_expr.alternative.is_none());
                    assert_eq!(if_expr.consequence.statements.len(), 1);
                }
                other => panic!("expected if expression, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn if_else_expression_reprints_both_arms() {
        let program = parse_ok("if (x < y) { x } else { y }");
        assert_eq!(program.string(), "if(x < y) xelse y");
    }

    #[test]
    fn function_literal_parses_parameters_and_body() {
        let program = parse_ok("fn(x, y) { x + y; }");
        match &program.statements[0] {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::FunctionLiteral(func) => {
                    let names: Vec<&str> =
                        func.parameters.iter().map(|p| p.value.as_str()).collect();
                    assert_eq!(names, vec!["x", "y"]);
                    assert_eq!(func.body.statements.len(), 1);
                }
                other => panic!("expected function literal, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn function_literal_parses_no_parameters() {
        let program = parse_ok("fn() { return 0; }");
        match &program.statements[0] {
            Statement::Expression(stmt) => match &stmt.expression {
                Expression::FunctionLiteral(func) => assert!(func.parameters.is_empty()),
                other => panic!("expected function literal, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}
