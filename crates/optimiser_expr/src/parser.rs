//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('**' | '^') unary)?
//! primary := number | ident | ident '(' expr ')' | '(' expr ')'
//! ```
//!
//! Power binds tighter than unary minus and associates to the right, so
//! `-x**2` is `-(x**2)` and `x**2**3` is `x**(2**3)`.

use std::f64::consts::{E, PI};

use crate::ast::{Function, Node};
use crate::error::ExpressionError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse `source` into a tree over `variable`.
pub(crate) fn parse(source: &str, variable: &str) -> Result<Node, ExpressionError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        variable,
    };
    let node = parser.expr()?;

    match parser.peek() {
        None => Ok(node),
        Some(token) => Err(unexpected(token, "operator or end of expression")),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    variable: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it has kind `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(token) if token.kind == *kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expr(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.term()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                let rhs = self.term()?;
                lhs = Node::Add(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&TokenKind::Minus) {
                let rhs = self.term()?;
                lhs = Node::Sub(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn term(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                let rhs = self.unary()?;
                lhs = Node::Mul(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&TokenKind::Slash) {
                let rhs = self.unary()?;
                lhs = Node::Div(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn unary(&mut self) -> Result<Node, ExpressionError> {
        if self.eat(&TokenKind::Minus) {
            Ok(Node::Negate(Box::new(self.unary()?)))
        } else if self.eat(&TokenKind::Plus) {
            self.unary()
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<Node, ExpressionError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Power) {
            let exponent = self.unary()?;
            Ok(Node::Pow(Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Node, ExpressionError> {
        const EXPECTED: &str = "number, identifier or '('";

        let token = self
            .next()
            .ok_or(ExpressionError::UnexpectedEnd { expected: EXPECTED })?;

        match &token.kind {
            TokenKind::Number(value) => Ok(Node::Constant(*value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.close_paren()?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                if self.eat(&TokenKind::LParen) {
                    let function =
                        Function::from_name(name).ok_or_else(|| ExpressionError::UnknownFunction {
                            name: name.clone(),
                            position: token.position,
                        })?;
                    let argument = self.expr()?;
                    self.close_paren()?;
                    Ok(Node::call(function, argument))
                } else {
                    self.identifier(name, token.position)
                }
            }
            _ => Err(unexpected(token, EXPECTED)),
        }
    }

    fn identifier(&self, name: &str, position: usize) -> Result<Node, ExpressionError> {
        if name == self.variable {
            return Ok(Node::Variable);
        }
        match name {
            "pi" => Ok(Node::Constant(PI)),
            "E" | "e" => Ok(Node::Constant(E)),
            _ => Err(ExpressionError::UnknownIdentifier {
                name: name.to_string(),
                position,
            }),
        }
    }

    fn close_paren(&mut self) -> Result<(), ExpressionError> {
        match self.next() {
            Some(token) if token.kind == TokenKind::RParen => Ok(()),
            Some(token) => Err(unexpected(token, "')'")),
            None => Err(ExpressionError::UnexpectedEnd { expected: "')'" }),
        }
    }
}

fn unexpected(token: &Token, expected: &'static str) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        found: token.kind.describe(),
        expected,
        position: token.position,
    }
}
