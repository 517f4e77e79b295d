use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The location of the first character of any source text.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    IntLiteral,
    BoolLiteral,
    Keyword,
    Identifier,
    Operator,
    Punctuation,
    End,
}

/// A single lexeme together with its classification and location. The text
/// is kept verbatim; nothing is decoded until the parser needs a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// The `End` token is never produced by the lexer; the parser conjures
    /// it once the real tokens run out.
    pub fn end(position: Position) -> Self {
        Self::new(TokenKind::End, "end of input", position)
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenKind::Keyword, word)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.is(TokenKind::Operator, op)
    }

    pub fn is_punctuation(&self, mark: &str) -> bool {
        self.is(TokenKind::Punctuation, mark)
    }
}
