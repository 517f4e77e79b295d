use std::fmt::Display;

use crate::lexer::Position;
use crate::parser::{FromTokens, ParseError, ParseState};

use super::{Expression, Id};

/// A type annotation is just a name; the type checker resolves it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeName {
    pub name: String,
    pub position: Position,
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// `var NAME (: TYPE)? = VALUE`. Only valid as a direct statement of a
/// block or the top level; `Expression::parse` rejects it anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VariableDeclaration<T> {
    pub name: Id<T>,
    pub type_annotation: Option<TypeName>,
    pub value: Expression<T>,
    pub position: Position,
    pub info: T,
}

impl FromTokens for VariableDeclaration<()> {
    fn parse(tokens: &mut ParseState) -> Result<Self, ParseError> {
        let position = tokens.expect("var")?.position;
        let name = Id::parse(tokens)?;

        let mut type_annotation = None;
        if tokens.peek().is_punctuation(":") {
            tokens.consume();
            let annotation = Id::parse(tokens)?;
            type_annotation = Some(TypeName {
                name: annotation.name,
                position: annotation.position,
            });
        }

        tokens.expect("=")?;
        let value = Expression::parse(tokens)?;

        Ok(VariableDeclaration {
            name,
            type_annotation,
            value,
            position,
            info: (),
        })
    }
}

impl<T> From<VariableDeclaration<T>> for Expression<T> {
    fn from(value: VariableDeclaration<T>) -> Self {
        Expression::Declaration(Box::new(value))
    }
}

impl<T> Display for VariableDeclaration<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.type_annotation {
            Some(annotation) => write!(f, "var {}: {} = {}", self.name, annotation, self.value),
            None => write!(f, "var {} = {}", self.name, self.value),
        }
    }
}
