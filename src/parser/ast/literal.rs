use std::fmt::Display;

use crate::lexer::{Position, TokenKind};
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LiteralValue {
    Int(i64),
    Bool(bool),
    Unit,
}

/// An integer or boolean literal, or the unit value. Unit has no written
/// form; it enters the tree through empty programs and the trailing-`;`
/// rule of blocks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Literal<T> {
    pub value: LiteralValue,
    pub position: Position,
    pub info: T,
}

impl Literal<()> {
    pub fn unit(position: Position) -> Self {
        Literal {
            value: LiteralValue::Unit,
            position,
            info: (),
        }
    }
}

impl FromTokens for Literal<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let next = tokens.peek();
        match next.kind {
            TokenKind::IntLiteral => {
                let token = tokens.consume();
                let value = token.text.parse::<i64>().map_err(|_| ParseError {
                    message: format!("integer literal \"{}\" is out of range", token.text),
                    position: token.position,
                })?;

                Ok(Literal {
                    value: LiteralValue::Int(value),
                    position: token.position,
                    info: (),
                })
            }
            TokenKind::BoolLiteral => {
                let token = tokens.consume();

                Ok(Literal {
                    value: LiteralValue::Bool(token.text == "true"),
                    position: token.position,
                    info: (),
                })
            }
            _ => Err(ParseError {
                message: format!("expected literal instead of \"{}\"", next.text),
                position: next.position,
            }),
        }
    }
}

impl<T> From<Literal<T>> for Expression<T> {
    fn from(value: Literal<T>) -> Self {
        Expression::Literal(value)
    }
}

impl<T> Display for Literal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            LiteralValue::Int(value) => write!(f, "{value}"),
            LiteralValue::Bool(value) => write!(f, "{value}"),
            LiteralValue::Unit => f.write_str("{}"),
        }
    }
}
