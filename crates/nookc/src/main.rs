//! `nookc` - the command-line entry point for the Nook interpreter.
//!
//! With no subcommand this starts the REPL; `nookc run <path>`
//! evaluates a file once and exits. Logging is routed through
//! `tracing`, gated at `debug` under `--verbose` and `info` otherwise;
//! every error that reaches `main` is printed as `error: {0}` and maps
//! to exit code 1.

mod cli;
mod config;
mod error;
mod repl;

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;
use error::NookError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), NookError> {
    let config = Config::load(cli.config.as_deref())?;
    let print_ast = cli.print_ast || config.print_ast;

    match &cli.command {
        None | Some(Command::Repl) => {
            tracing::info!("starting REPL");
            let stdin = io::stdin();
            let stdout = BufWriter::new(io::stdout());
            repl::run(stdin.lock(), stdout, &config.prompt, print_ast)
        }
        Some(Command::Run { path }) => run_file(path, print_ast),
    }
}

fn run_file(path: &std::path::Path, print_ast: bool) -> Result<(), NookError> {
    let source = std::fs::read_to_string(path)?;
    let (program, errors) = nook_parser::parser::parse(&source);
    if !errors.is_empty() {
        return Err(NookError::Parse(format!(
            "{} parse error(s):\n{}",
            errors.len(),
            errors
                .iter()
                .map(|e| format!("\t{e}"))
                .collect::<Vec<_>>()
                .join("\n")
        )));
    }

    if print_ast {
        println!("{}", program.string());
        return Ok(());
    }

    let env = nook_object::Environment::new();
    let result = nook_eval::eval_program(&program, &env);
    if result.is_error() {
        return Err(NookError::Parse(result.inspect()));
    }
    Ok(())
}
