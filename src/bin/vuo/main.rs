//! # Vuo
//!
//! This binary is the command line surface of the Vuo front end. It wires
//! the tokenizer, parser, and type checker into a single `typecheck`
//! command.

mod cli;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use cli::{Cli, Commands, TypecheckArgs};
use log::{debug, error, info};
use vuo_lang::{
    lexer::Lexer,
    parser,
    typechecker::{Type, Typechecker},
    Diagnostic,
};

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    match args.command {
        Commands::Typecheck(typecheck_args) => typecheck(&typecheck_args),
    }
}

fn typecheck(args: &TypecheckArgs) {
    let source = match read_source(args.file.as_deref()) {
        Ok(source) => source,
        Err(io_error) => {
            error!("{io_error}");
            std::process::exit(1);
        }
    };

    match run_pipeline(&source, args) {
        Ok(checked) => println!("✓ well typed: {checked}"),
        Err(diagnostic) => {
            error!("{diagnostic}");
            std::process::exit(1);
        }
    }
}

fn read_source(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn run_pipeline(source: &str, args: &TypecheckArgs) -> Result<Type, Diagnostic> {
    let tokens = Lexer::new(source).lex()?;
    debug!("lexed {} tokens", tokens.len());

    let ast = parser::parse(tokens)?;
    if args.dump_ast {
        dump("parsed AST", &ast);
    }

    let checked = Typechecker::from_ast(ast).check()?;
    if args.dump_typed {
        dump("typed AST", &checked);
    }

    Ok(checked.info())
}

fn dump(label: &str, ast: &impl serde::Serialize) {
    match serde_json::to_string_pretty(ast) {
        Ok(json) => info!("{label}:\n{json}"),
        Err(serde_error) => debug!("could not serialize {label}: {serde_error}"),
    }
}
