use std::fmt::Display;

use crate::lexer::Position;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::Expression;

/// `if COND then THEN (else ELSE)?`. Without an `else` the whole
/// expression has type `Unit`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct If<T> {
    pub condition: Expression<T>,
    pub then_branch: Expression<T>,
    pub else_branch: Option<Expression<T>>,
    pub position: Position,
    pub info: T,
}

impl FromTokens for If<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let position = tokens.expect("if")?.position;
        let condition = Expression::parse(tokens)?;
        tokens.expect("then")?;
        let then_branch = Expression::parse(tokens)?;

        let mut else_branch = None;
        if tokens.peek().is_keyword("else") {
            tokens.consume();
            else_branch = Some(Expression::parse(tokens)?);
        }

        Ok(If {
            condition,
            then_branch,
            else_branch,
            position,
            info: (),
        })
    }
}

impl<T> From<If<T>> for Expression<T> {
    fn from(value: If<T>) -> Self {
        Expression::If(Box::new(value))
    }
}

impl<T> Display for If<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.else_branch {
            Some(else_branch) => write!(
                f,
                "(if {} then {} else {})",
                self.condition, self.then_branch, else_branch
            ),
            None => write!(f, "(if {} then {})", self.condition, self.then_branch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BinaryExpression, BinaryOperator, Literal, LiteralValue};
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_if_else() {
        let tokens = Lexer::new("if 1 < 2 then 3 else 4").lex().expect("should lex");

        assert_eq!(
            Ok(If {
                condition: Expression::Binary(Box::new(BinaryExpression {
                    left: Expression::Literal(Literal {
                        value: LiteralValue::Int(1),
                        position: Position::new(1, 4),
                        info: ()
                    }),
                    op: BinaryOperator::LessThan,
                    right: Expression::Literal(Literal {
                        value: LiteralValue::Int(2),
                        position: Position::new(1, 8),
                        info: ()
                    }),
                    position: Position::new(1, 6),
                    info: ()
                })),
                then_branch: Expression::Literal(Literal {
                    value: LiteralValue::Int(3),
                    position: Position::new(1, 15),
                    info: ()
                }),
                else_branch: Some(Expression::Literal(Literal {
                    value: LiteralValue::Int(4),
                    position: Position::new(1, 22),
                    info: ()
                })),
                position: Position::new(1, 1),
                info: ()
            }),
            If::parse(&mut tokens.into())
        );
    }

    #[test]
    fn test_if_without_else() {
        let tokens = Lexer::new("if x then 1").lex().expect("should lex");

        let result = If::parse(&mut tokens.into()).expect("should parse");

        assert!(result.else_branch.is_none());
    }

    #[test]
    fn test_else_binds_to_the_innermost_if() {
        let tokens = Lexer::new("if a then if b then 1 else 2")
            .lex()
            .expect("should lex");

        let result = If::parse(&mut tokens.into()).expect("should parse");

        assert!(result.else_branch.is_none());
        let Expression::If(inner) = &result.then_branch else {
            panic!("expected nested if, got {:?}", result.then_branch);
        };
        assert!(inner.else_branch.is_some());
    }

    #[test]
    fn test_missing_then() {
        let tokens = Lexer::new("if x 1").lex().expect("should lex");

        assert_eq!(
            Err(ParseError {
                message: "expected \"then\" instead of \"1\"".into(),
                position: Position::new(1, 6),
            }),
            If::parse(&mut tokens.into())
        );
    }
}
