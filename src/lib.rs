//! Compiler front end for the Vuo programming language.
//!
//! The pipeline is `tokenize → parse → typecheck`: [`lexer::Lexer`] turns
//! source text into positioned tokens, [`parser::parse`] builds the AST, and
//! [`typechecker::Typechecker`] rebuilds the AST with a type attached to
//! every node. Each stage either succeeds or reports the first error it
//! encounters; there is no recovery.

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod typechecker;

pub use diagnostics::{Diagnostic, Stage};

use lexer::Lexer;
use typechecker::{Type, Typechecker};

/// Run the full pipeline on `source` and return the program's type, or the
/// first diagnostic any stage produced.
pub fn check(source: &str) -> Result<Type, Diagnostic> {
    let tokens = Lexer::new(source).lex()?;
    let ast = parser::parse(tokens)?;
    let checked = Typechecker::from_ast(ast).check()?;

    Ok(checked.info())
}
