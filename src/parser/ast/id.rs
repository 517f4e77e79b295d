use std::fmt::Display;

use crate::lexer::{Position, TokenKind};
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Id<T> {
    pub name: String,
    pub position: Position,
    pub info: T,
}

impl FromTokens for Id<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let next = tokens.peek();
        if next.kind != TokenKind::Identifier {
            return Err(ParseError {
                message: format!("expected identifier instead of \"{}\"", next.text),
                position: next.position,
            });
        }

        let token = tokens.consume();

        Ok(Id {
            name: token.text,
            position: token.position,
            info: (),
        })
    }
}

impl<T> From<Id<T>> for Expression<T> {
    fn from(value: Id<T>) -> Self {
        Expression::Id(value)
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}
