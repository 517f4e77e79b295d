//! AST nodes for Vuo.
//!
//! Every node is generic over an info slot `T`: the parser produces
//! `Expression<()>`, the type checker fills the slot with the node's
//! inferred type. Nodes are immutable once built.

mod binary;
mod block;
mod call;
mod declaration;
mod id;
mod if_expression;
mod literal;
mod unary;
mod while_loop;

pub use self::binary::*;
pub use self::block::*;
pub use self::call::*;
pub use self::declaration::*;
pub use self::id::*;
pub use self::if_expression::*;
pub use self::literal::*;
pub use self::unary::*;
pub use self::while_loop::*;

use std::fmt::Display;

use crate::lexer::{Position, TokenKind};
use crate::parser::{FromTokens, ParseError, ParseState};

/// Binary operator levels, tightest first; `parse_binary` walks the table
/// back to front. Assignment sits above the table (right-associative),
/// unary operators below it.
const BINARY_OPERATORS: [&[BinaryOperator]; 6] = [
    &[
        BinaryOperator::Times,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
    ],
    &[BinaryOperator::Plus, BinaryOperator::Minus],
    &[
        BinaryOperator::LessThan,
        BinaryOperator::LessOrEqual,
        BinaryOperator::GreaterThan,
        BinaryOperator::GreaterOrEqual,
    ],
    &[BinaryOperator::Equal, BinaryOperator::NotEqual],
    &[BinaryOperator::And],
    &[BinaryOperator::Or],
];

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Expression<T> {
    Literal(Literal<T>),
    Id(Id<T>),
    Unary(Box<UnaryExpression<T>>),
    Binary(Box<BinaryExpression<T>>),
    If(Box<If<T>>),
    While(Box<WhileLoop<T>>),
    Call(Box<FunctionCall<T>>),
    Declaration(Box<VariableDeclaration<T>>),
    Block(Block<T>),
}

impl<T> Expression<T> {
    pub fn position(&self) -> Position {
        match self {
            Expression::Literal(Literal { position, .. }) => *position,
            Expression::Id(Id { position, .. }) => *position,
            Expression::Unary(unary) => unary.position,
            Expression::Binary(binary) => binary.position,
            Expression::If(if_expression) => if_expression.position,
            Expression::While(while_loop) => while_loop.position,
            Expression::Call(call) => call.position,
            Expression::Declaration(declaration) => declaration.position,
            Expression::Block(Block { position, .. }) => *position,
        }
    }
}

impl<T> Expression<T>
where
    T: Clone,
{
    pub fn info(&self) -> T {
        match self {
            Expression::Literal(Literal { info, .. }) => info.clone(),
            Expression::Id(Id { info, .. }) => info.clone(),
            Expression::Unary(unary) => unary.info.clone(),
            Expression::Binary(binary) => binary.info.clone(),
            Expression::If(if_expression) => if_expression.info.clone(),
            Expression::While(while_loop) => while_loop.info.clone(),
            Expression::Call(call) => call.info.clone(),
            Expression::Declaration(declaration) => declaration.info.clone(),
            Expression::Block(Block { info, .. }) => info.clone(),
        }
    }
}

impl FromTokens for Expression<()> {
    /// Parse an expression in a position where a variable declaration is
    /// not allowed (operands, arguments, parentheses, conditions, ...).
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let next = tokens.peek();
        if next.is_keyword("var") {
            return Err(ParseError {
                message:
                    "variable declaration is only allowed directly inside {blocks} and at the top level"
                        .into(),
                position: next.position,
            });
        }

        Self::parse_assignment(tokens)
    }
}

impl Expression<()> {
    /// Parse a statement: an expression, or a variable declaration. Blocks
    /// and the top level are the only callers.
    pub fn parse_statement(tokens: &mut ParseState) -> Result<Self, ParseError> {
        if tokens.peek().is_keyword("var") {
            return VariableDeclaration::parse(tokens).map(Into::into);
        }

        Self::parse_assignment(tokens)
    }

    fn parse_assignment(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let expression = Self::parse_binary(tokens, BINARY_OPERATORS.len())?;

        if tokens.peek().is_operator("=") {
            let token = tokens.consume();
            let right = Self::parse_assignment(tokens)?;
            return Ok(Expression::Binary(Box::new(BinaryExpression {
                left: expression,
                op: BinaryOperator::Assign,
                right,
                position: token.position,
                info: (),
            })));
        }

        Ok(expression)
    }

    fn parse_binary(tokens: &mut ParseState, level: usize) -> Result<Self, ParseError> {
        if level == 0 {
            return Self::parse_unary(tokens);
        }

        let operators = BINARY_OPERATORS[level - 1];
        let mut expression = Self::parse_binary(tokens, level - 1)?;

        loop {
            let next = tokens.peek();
            let Some(op) = operators
                .iter()
                .copied()
                .find(|op| next.is_operator(op.as_str()))
            else {
                return Ok(expression);
            };

            let token = tokens.consume();
            let right = Self::parse_binary(tokens, level - 1)?;
            expression = Expression::Binary(Box::new(BinaryExpression {
                left: expression,
                op,
                right,
                position: token.position,
                info: (),
            }));
        }
    }

    fn parse_unary(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let next = tokens.peek();

        if next.is_operator("-") || next.is_operator("not") {
            let token = tokens.consume();
            let op = if token.text == "-" {
                UnaryOperator::Minus
            } else {
                UnaryOperator::Not
            };
            let operand = Self::parse_unary(tokens)?;
            return Ok(Expression::Unary(Box::new(UnaryExpression {
                op,
                operand,
                position: token.position,
                info: (),
            })));
        }

        if next.is_keyword("if") {
            return If::parse(tokens).map(Into::into);
        }
        if next.is_keyword("while") {
            return WhileLoop::parse(tokens).map(Into::into);
        }

        Self::parse_term(tokens)
    }

    /// Parse a primary expression followed by any number of `(args)` call
    /// suffixes.
    fn parse_term(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let next = tokens.peek();

        let mut expression = if next.is_punctuation("{") {
            Block::parse(tokens)?.into()
        } else if next.is_punctuation("(") {
            Self::parse_parentheses(tokens)?
        } else if next.kind == TokenKind::IntLiteral || next.kind == TokenKind::BoolLiteral {
            Literal::parse(tokens)?.into()
        } else if next.kind == TokenKind::Identifier {
            Id::parse(tokens)?.into()
        } else {
            return Err(ParseError {
                message: format!("expected expression instead of \"{}\"", next.text),
                position: next.position,
            });
        };

        while tokens.peek().is_punctuation("(") {
            expression = FunctionCall::parse_suffix(expression, tokens)?.into();
        }

        Ok(expression)
    }

    /// Exactly one expression between the parentheses.
    fn parse_parentheses(tokens: &mut ParseState) -> Result<Self, ParseError> {
        tokens.expect("(")?;
        let expression = Expression::parse(tokens)?;
        tokens.expect(")")?;

        Ok(expression)
    }
}

impl<T> Display for Expression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(literal) => literal.fmt(f),
            Expression::Id(id) => id.fmt(f),
            Expression::Unary(unary) => unary.fmt(f),
            Expression::Binary(binary) => binary.fmt(f),
            Expression::If(if_expression) => if_expression.fmt(f),
            Expression::While(while_loop) => while_loop.fmt(f),
            Expression::Call(call) => call.fmt(f),
            Expression::Declaration(declaration) => declaration.fmt(f),
            Expression::Block(block) => block.fmt(f),
        }
    }
}
