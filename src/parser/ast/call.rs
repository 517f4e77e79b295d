use std::fmt::Display;

use crate::lexer::Position;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

/// A call suffix applied to an already-parsed callee. The callee is an
/// arbitrary expression; whether it is actually callable is the type
/// checker's business. The node's position is the opening parenthesis.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FunctionCall<T> {
    pub callee: Expression<T>,
    pub arguments: Vec<Expression<T>>,
    pub position: Position,
    pub info: T,
}

impl FunctionCall<()> {
    pub fn parse_suffix(
        callee: Expression<()>,
        tokens: &mut ParseState,
    ) -> Result<Self, ParseError> {
        let position = tokens.expect("(")?.position;

        let mut arguments = vec![];
        if !tokens.peek().is_punctuation(")") {
            arguments.push(Expression::parse(tokens)?);
            while tokens.peek().is_punctuation(",") {
                tokens.consume();
                arguments.push(Expression::parse(tokens)?);
            }
        }
        tokens.expect(")")?;

        Ok(FunctionCall {
            callee,
            arguments,
            position,
            info: (),
        })
    }
}

impl<T> From<FunctionCall<T>> for Expression<T> {
    fn from(value: FunctionCall<T>) -> Self {
        Expression::Call(Box::new(value))
    }
}

impl<T> Display for FunctionCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.callee)?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            argument.fmt(f)?;
        }
        f.write_str(")")
    }
}
