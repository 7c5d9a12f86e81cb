//! Command-line surface.
//!
//! `nookc` with no subcommand starts the REPL; `nookc run <path>`
//! evaluates a file and exits. Both read `--verbose`/`--no-color` from
//! either flags or the matching `NOOK_*` environment variable, via
//! clap's `env` feature.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nookc", about = "The Nook language REPL and script runner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emit debug-level logs instead of info-level.
    #[arg(long, short = 'v', global = true, env = "NOOK_VERBOSE")]
    pub verbose: bool,

    /// Disable ANSI color in log output.
    #[arg(long, global = true, env = "NOOK_NO_COLOR")]
    pub no_color: bool,

    /// Path to a `nook.toml` configuration file. Defaults to
    /// `./nook.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the parsed AST instead of evaluating it.
    #[arg(long, global = true)]
    pub print_ast: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive read-eval-print loop (the default).
    Repl,
    /// Parse and evaluate a single source file.
    Run {
        /// Path to a `.nook` source file.
        path: PathBuf,
    },
}
