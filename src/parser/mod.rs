//! Parser for Vuo token streams.
//!
//! Recursive descent with a table-driven precedence ladder for binary
//! operators. The parser owns a [`ParseState`] cursor; the one unusual bit
//! of state is the memory of the previously consumed token, which drives
//! the statement terminator rule (no `;` needed after a brace-terminated
//! statement).

pub mod ast;

use std::{error::Error, fmt::Display};

use crate::lexer::{Position, Token, TokenKind};

use self::ast::{Block, Expression, Literal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for ParseError {}

pub trait FromTokens: Sized {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError>;
}

/// Cursor over the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    previous: Option<Token>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            previous: None,
        }
    }

    /// Peek at the current token. Once the real tokens run out this yields
    /// an `End` token carrying the last token's position.
    pub fn peek(&self) -> Token {
        match self.tokens.get(self.index) {
            Some(token) => token.clone(),
            None => {
                let position = self
                    .tokens
                    .last()
                    .map(|token| token.position)
                    .unwrap_or(Position::start());
                Token::end(position)
            }
        }
    }

    /// Consume the current token and move the cursor forward.
    pub fn consume(&mut self) -> Token {
        let token = self.peek();
        self.index += 1;
        self.previous = Some(token.clone());
        token
    }

    /// Consume the current token, requiring its text to match `expected`.
    pub fn expect(&mut self, expected: &str) -> Result<Token, ParseError> {
        let token = self.peek();
        if token.text != expected {
            return Err(ParseError {
                message: format!("expected \"{expected}\" instead of \"{}\"", token.text),
                position: token.position,
            });
        }

        Ok(self.consume())
    }

    /// Whether the most recently consumed token was a closing brace, i.e.
    /// the statement just parsed was brace-terminated.
    pub fn brace_terminated(&self) -> bool {
        self.previous
            .as_ref()
            .map(|token| token.is_punctuation("}"))
            .unwrap_or(false)
    }
}

impl From<Vec<Token>> for ParseState {
    fn from(value: Vec<Token>) -> Self {
        Self::new(value)
    }
}

/// Parse a whole program. A single expression comes back unwrapped; two or
/// more top-level statements are wrapped in a synthetic block positioned at
/// the start of the source, with `End` playing the role the closing brace
/// has inside a block.
pub fn parse(tokens: Vec<Token>) -> Result<Expression<()>, ParseError> {
    let mut tokens = ParseState::new(tokens);

    if tokens.peek().kind == TokenKind::End {
        return Ok(Literal::unit(tokens.peek().position).into());
    }

    let first = Expression::parse_statement(&mut tokens)?;
    if tokens.peek().kind == TokenKind::End {
        return Ok(first);
    }

    let mut statements = vec![first];
    while tokens.peek().kind != TokenKind::End {
        if !tokens.brace_terminated() {
            let semicolon = tokens.expect(";")?;
            if tokens.peek().kind == TokenKind::End {
                statements.push(Literal::unit(semicolon.position).into());
                break;
            }
        } else if tokens.peek().is_punctuation(";") {
            let semicolon = tokens.consume();
            if tokens.peek().kind == TokenKind::End {
                statements.push(Literal::unit(semicolon.position).into());
                break;
            }
        }
        statements.push(Expression::parse_statement(&mut tokens)?);
    }

    Ok(Expression::Block(Block {
        statements,
        position: Position::start(),
        info: (),
    }))
}

#[cfg(test)]
mod tests {
    use super::ast::*;
    use super::*;
    use crate::lexer::Lexer;

    fn parse_source(source: &str) -> Result<Expression<()>, ParseError> {
        parse(Lexer::new(source).lex().expect("lexing should succeed"))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            Ok(Expression::Literal(Literal {
                value: LiteralValue::Unit,
                position: Position::new(1, 1),
                info: ()
            })),
            parse(vec![])
        );
    }

    #[test]
    fn test_single_expression_is_unwrapped() {
        assert_eq!(
            Ok(Expression::Binary(Box::new(BinaryExpression {
                left: Expression::Literal(Literal {
                    value: LiteralValue::Int(1),
                    position: Position::new(1, 1),
                    info: ()
                }),
                op: BinaryOperator::Plus,
                right: Expression::Literal(Literal {
                    value: LiteralValue::Int(2),
                    position: Position::new(1, 5),
                    info: ()
                }),
                position: Position::new(1, 3),
                info: ()
            }))),
            parse_source("1 + 2")
        );
    }

    #[test]
    fn test_statements_are_wrapped_in_a_block() {
        assert_eq!(
            Ok(Expression::Block(Block {
                statements: vec![
                    Expression::Literal(Literal {
                        value: LiteralValue::Int(1),
                        position: Position::new(1, 1),
                        info: ()
                    }),
                    Expression::Literal(Literal {
                        value: LiteralValue::Int(2),
                        position: Position::new(1, 4),
                        info: ()
                    }),
                ],
                position: Position::new(1, 1),
                info: ()
            })),
            parse_source("1; 2")
        );
    }

    #[test]
    fn test_trailing_semicolon_appends_unit() {
        assert_eq!(
            Ok(Expression::Block(Block {
                statements: vec![
                    Expression::Literal(Literal {
                        value: LiteralValue::Int(1),
                        position: Position::new(1, 1),
                        info: ()
                    }),
                    Expression::Literal(Literal {
                        value: LiteralValue::Unit,
                        position: Position::new(1, 2),
                        info: ()
                    }),
                ],
                position: Position::new(1, 1),
                info: ()
            })),
            parse_source("1;")
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            Err(ParseError {
                message: "expected \";\" instead of \"2\"".into(),
                position: Position::new(1, 3),
            }),
            parse_source("1 2")
        );
    }

    #[test]
    fn test_no_separator_needed_after_brace() {
        assert_eq!(
            Ok(Expression::Block(Block {
                statements: vec![
                    Expression::Block(Block {
                        statements: vec![],
                        position: Position::new(1, 1),
                        info: ()
                    }),
                    Expression::Literal(Literal {
                        value: LiteralValue::Int(2),
                        position: Position::new(1, 4),
                        info: ()
                    }),
                ],
                position: Position::new(1, 1),
                info: ()
            })),
            parse_source("{} 2")
        );
    }

    #[test]
    fn test_optional_separator_after_brace() {
        let with_separator = parse_source("{ 1 }; 2").expect("should parse");
        let without_separator = parse_source("{ 1 } 2").expect("should parse");

        // Same shape; only the positions differ.
        assert_eq!(with_separator.to_string(), without_separator.to_string());
    }

    #[test]
    fn test_declaration_at_top_level() {
        assert_eq!(
            Ok(Expression::Declaration(Box::new(VariableDeclaration {
                name: Id {
                    name: "a".into(),
                    position: Position::new(1, 5),
                    info: ()
                },
                type_annotation: None,
                value: Expression::Literal(Literal {
                    value: LiteralValue::Int(1),
                    position: Position::new(1, 9),
                    info: ()
                }),
                position: Position::new(1, 1),
                info: ()
            }))),
            parse_source("var a = 1")
        );
    }

    #[test]
    fn test_declaration_not_allowed_in_parentheses() {
        assert_eq!(
            Err(ParseError {
                message:
                    "variable declaration is only allowed directly inside {blocks} and at the top level"
                        .into(),
                position: Position::new(1, 2),
            }),
            parse_source("(var a = 1)")
        );
    }

    #[test]
    fn test_unbalanced_parenthesis_at_top_level() {
        assert!(parse_source("1 + 2)").is_err());
    }
}
