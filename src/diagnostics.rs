//! Pipeline-level error reporting.
//!
//! Every stage has its own error type; [`Diagnostic`] is the common shape
//! the pipeline hands to callers, rendered as `line L, column C: <message>`.

use std::{error::Error, fmt::Display};

use crate::lexer::{LexError, Position};
use crate::parser::ParseError;
use crate::typechecker::TypeError;

/// The stage a diagnostic originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Type,
}

/// A single positioned error. The pipeline halts at the first one; there is
/// no warning channel and no secondary diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub position: Position,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl Error for Diagnostic {}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic {
            stage: Stage::Lex,
            position: error.position,
            message: error.message,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic {
            stage: Stage::Parse,
            position: error.position,
            message: error.message,
        }
    }
}

impl From<TypeError> for Diagnostic {
    fn from(error: TypeError) -> Self {
        Diagnostic {
            stage: Stage::Type,
            position: error.position,
            message: error.to_string(),
        }
    }
}
