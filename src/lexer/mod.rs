//! Lexer for Vuo source text.
//!
//! Turns a source string into a sequence of positioned [`Token`]s. Lexemes
//! are matched longest-first; word-shaped lexemes are read in full and then
//! reclassified, so `andor` or `notnot` stay identifiers instead of
//! decaying into operator prefixes.

mod token;

pub use token::*;

use std::{collections::HashMap, error::Error, fmt::Display, iter::Peekable, str::Chars};

use once_cell::sync::Lazy;

/// Classification of word-shaped lexemes. Everything absent from this map
/// is an ordinary identifier.
static WORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut words = HashMap::new();

    for op in ["and", "or", "not"] {
        words.insert(op, TokenKind::Operator);
    }
    for literal in ["true", "false"] {
        words.insert(literal, TokenKind::BoolLiteral);
    }
    for keyword in ["if", "then", "else", "while", "do", "var"] {
        words.insert(keyword, TokenKind::Keyword);
    }

    words
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl Error for LexError {}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: vec![],
            iterator: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.iterator.next()?;

        // '\n', '\r', '\v' and '\f' each start a new line.
        match next {
            '\n' | '\r' | '\x0B' | '\x0C' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }

        Some(next)
    }

    fn advance_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        if func(self.iterator.peek()?) {
            return self.advance();
        }

        None
    }

    fn eat_whitespace(&mut self) {
        while self.advance_if(|item| item.is_whitespace()).is_some() {}
    }

    /// Skip the rest of the current line. Line endings stay put and are
    /// consumed as whitespace afterwards.
    fn skip_comment(&mut self) {
        while self.iterator.next_if(|item| *item != '\n').is_some() {
            self.column += 1;
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            self.eat_whitespace();

            let Some(next) = self.peek() else {
                return Ok(self.tokens);
            };

            match next {
                '#' => self.skip_comment(),
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
                '0'..='9' => self.lex_numeric()?,
                _ => self.lex_special()?,
            }
        }
    }

    /// Lex a word-shaped lexeme and classify it as a keyword, a word
    /// operator, a boolean literal, or an identifier.
    fn lex_word(&mut self) {
        let position = self.position();
        let mut word = String::new();

        while let Some(next) = self.advance_if(|item| item.is_ascii_alphanumeric() || *item == '_')
        {
            word.push(next);
        }

        let kind = WORDS
            .get(word.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        self.tokens.push(Token::new(kind, word, position));
    }

    fn lex_numeric(&mut self) -> LexResult<()> {
        let position = self.position();
        let mut read = String::new();

        while let Some(next) = self.advance_if(|item| item.is_ascii_digit()) {
            read.push(next);
        }

        // A letter glued to a digit run is not a new token; literals and
        // identifiers have to be separated.
        let glued = self
            .peek()
            .map(|item| item.is_ascii_alphabetic() || item == '_')
            .unwrap_or(false);
        if glued {
            while let Some(next) =
                self.advance_if(|item| item.is_ascii_alphanumeric() || *item == '_')
            {
                read.push(next);
            }
            return Err(LexError {
                message: format!("invalid token \"{read}\""),
                position,
            });
        }

        self.tokens
            .push(Token::new(TokenKind::IntLiteral, read, position));

        Ok(())
    }

    fn lex_special(&mut self) -> LexResult<()> {
        let position = self.position();

        let Some(next) = self.advance() else {
            return Ok(());
        };

        match next {
            '(' | ')' | '{' | '}' | ',' | ';' | ':' => {
                self.tokens
                    .push(Token::new(TokenKind::Punctuation, next, position));
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.skip_comment();
                } else {
                    self.tokens
                        .push(Token::new(TokenKind::Operator, '/', position));
                }
            }
            '=' | '<' | '>' => {
                let mut text = next.to_string();
                if let Some(eq) = self.advance_if(|item| *item == '=') {
                    text.push(eq);
                }
                self.tokens
                    .push(Token::new(TokenKind::Operator, text, position));
            }
            '!' => {
                if self.advance_if(|item| *item == '=').is_some() {
                    self.tokens
                        .push(Token::new(TokenKind::Operator, "!=", position));
                } else {
                    return Err(LexError {
                        message: "unrecognized character '!'".into(),
                        position,
                    });
                }
            }
            '%' | '*' | '+' | '-' => {
                self.tokens
                    .push(Token::new(TokenKind::Operator, next, position));
            }
            other => {
                return Err(LexError {
                    message: format!("unrecognized character '{other}'"),
                    position,
                });
            }
        }

        Ok(())
    }
}
