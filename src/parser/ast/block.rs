use std::fmt::Display;

use crate::lexer::Position;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::{Expression, Literal, LiteralValue};

/// `{ stmts }`. The block's value is its last statement's; a trailing `;`
/// plants an implicit unit literal, so such a block is `Unit`-valued.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block<T> {
    pub statements: Vec<Expression<T>>,
    pub position: Position,
    pub info: T,
}

impl FromTokens for Block<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let position = tokens.expect("{")?.position;

        let mut statements = vec![];
        if !tokens.peek().is_punctuation("}") {
            statements.push(Expression::parse_statement(tokens)?);

            while !tokens.peek().is_punctuation("}") {
                if !tokens.brace_terminated() {
                    // A separator is mandatory after a statement that did
                    // not end in '}'.
                    let semicolon = tokens.expect(";")?;
                    if tokens.peek().is_punctuation("}") {
                        statements.push(Literal::unit(semicolon.position).into());
                        break;
                    }
                } else if tokens.peek().is_punctuation(";") {
                    let semicolon = tokens.consume();
                    if tokens.peek().is_punctuation("}") {
                        statements.push(Literal::unit(semicolon.position).into());
                        break;
                    }
                }
                statements.push(Expression::parse_statement(tokens)?);
            }
        }
        tokens.expect("}")?;

        Ok(Block {
            statements,
            position,
            info: (),
        })
    }
}

impl<T> From<Block<T>> for Expression<T> {
    fn from(value: Block<T>) -> Self {
        Expression::Block(value)
    }
}

impl<T> Display for Block<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }

        let trailing_unit = matches!(
            self.statements.last(),
            Some(Expression::Literal(Literal {
                value: LiteralValue::Unit,
                ..
            }))
        );

        let mut rendered: Vec<String> = self
            .statements
            .iter()
            .map(|statement| statement.to_string())
            .collect();

        if trailing_unit {
            rendered.pop();
            write!(f, "{{ {}; }}", rendered.join("; "))
        } else {
            write!(f, "{{ {} }}", rendered.join("; "))
        }
    }
}
