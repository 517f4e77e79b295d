//! Command line definitions for the `vuo` binary, built on clap's derive
//! API. Only the argument surface lives here; `main.rs` does the work.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level argument set: one subcommand plus the shared verbosity
/// switch.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// How much of the pipeline's inner workings to log.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// How chatty the front end should be on stderr. Diagnostics for the
/// source program are always printed; everything else is gated here.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// Stay quiet unless something goes wrong. This is what you get
    /// without `-v`.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Additionally surface suspicious-but-survivable conditions.
    #[value(alias("1"))]
    Warn,

    /// Report pipeline milestones; the `--dump-ast`/`--dump-typed` output
    /// lands at this level.
    #[value(alias("2"))]
    Info,

    /// Per-stage internals, such as token counts.
    #[value(alias("3"))]
    Debug,

    /// Everything the pipeline can say, mostly noise.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the type checker on a Vuo source file (or standard input).
    Typecheck(TypecheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TypecheckArgs {
    /// The path to the Vuo source file. Standard input is read when this
    /// is omitted.
    #[arg(index = 1)]
    pub file: Option<std::path::PathBuf>,

    /// Whether to dump the parsed AST as JSON (for debugging).
    #[arg(long)]
    pub dump_ast: bool,

    /// Whether to dump the type-checked AST as JSON (for debugging).
    #[arg(long)]
    pub dump_typed: bool,
}
