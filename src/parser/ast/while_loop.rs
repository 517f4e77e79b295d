use std::fmt::Display;

use crate::lexer::Position;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

/// `while COND do BODY`. The loop itself always has type `Unit`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhileLoop<T> {
    pub condition: Expression<T>,
    pub body: Expression<T>,
    pub position: Position,
    pub info: T,
}

impl FromTokens for WhileLoop<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let position = tokens.expect("while")?.position;
        let condition = Expression::parse(tokens)?;
        tokens.expect("do")?;
        let body = Expression::parse(tokens)?;

        Ok(WhileLoop {
            condition,
            body,
            position,
            info: (),
        })
    }
}

impl<T> From<WhileLoop<T>> for Expression<T> {
    fn from(value: WhileLoop<T>) -> Self {
        Expression::While(Box::new(value))
    }
}

impl<T> Display for WhileLoop<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(while {} do {})", self.condition, self.body)
    }
}
