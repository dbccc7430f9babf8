//! Lithp command line.
//!
//! With a file argument, prints the file's tokens and its expression tree.
//! Without one, starts the REPL.
//!
//! ```ignore
//! lithp [-h | -help] [filepath]
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lithp::{render_body, render_tokens, ReadError};

const USAGE: &str = "lithp [-h | -help] [filepath]\nPassing no arguments starts the REPL";

#[derive(Parser, Debug)]
#[command(name = "lithp", version, disable_help_flag = true)]
struct Args {
    /// Print usage and exit.
    #[arg(short = 'h', long = "help")]
    help: bool,

    /// Lisp source to read; without one, start the REPL.
    path: Option<PathBuf>,
}

/// Accept the single-dash `-help` spelling alongside `-h` and `--help`.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| if arg == "-help" { "--help".to_owned() } else { arg })
        .collect()
}

fn main() -> ExitCode {
    lithp::logging::init();
    let args = Args::parse_from(normalize_args(std::env::args()));

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let result = match args.path {
        Some(path) => read_file(&path)
            .and_then(|text| print_source(&text, &mut std::io::stdout().lock())),
        None => lithp::repl(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("exiting after error: {e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_file(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("could not read {}: {e}", path.display()))
    })
}

/// Print the tokens of the source, then its expressions.
fn print_source(text: &str, out: &mut impl Write) -> std::io::Result<()> {
    let tokens = lithp::lex(text).map_err(ReadError::from)?;
    writeln!(out, "Lexer Output:")?;
    writeln!(out, "{}", render_tokens(&tokens))?;

    writeln!(out, "\nParser Output:")?;
    let body = lithp::parse(&tokens).map_err(ReadError::from)?;
    writeln!(out, "{}", render_body(&body))?;
    Ok(())
}
