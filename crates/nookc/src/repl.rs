//! The interactive read-eval-print loop.
//!
//! One [`Environment`] is shared across the whole session, so a `let`
//! on one line is visible on the next. Parse errors are reported
//! tab-indented (so they read as a block set off from the prompt) and
//! do not end the session; only EOF on stdin does.

use std::io::{BufRead, Write};

use nook_eval::eval_program;
use nook_object::Environment;
use nook_parser::parser::parse;

use crate::error::NookError;

pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    prompt: &str,
    print_ast: bool,
) -> Result<(), NookError> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let (program, errors) = parse(&line);
        if !errors.is_empty() {
            write_parse_errors(&mut output, &errors)?;
            continue;
        }

        if print_ast {
            writeln!(output, "{}", program.string())?;
            continue;
        }

        let result = eval_program(&program, &env);
        writeln!(output, "{}", result.inspect())?;
    }
}

fn write_parse_errors<W: Write>(output: &mut W, errors: &[String]) -> Result<(), NookError> {
    writeln!(output, "parser errors:")?;
    for err in errors {
        writeln!(output, "\t{err}")?;
    }
    Ok(())
}
