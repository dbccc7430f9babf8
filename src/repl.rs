//! Read-only REPL: reads a line, parses it, prints the tree.
//!
//! Nothing is evaluated. A line that fails to read is reported on the
//! error stream, and the loop continues with the next line.

use std::io::{BufRead, Write};

use crate::data::render_body;
use crate::reader::read;

pub const BANNER: &str = "Lithp REPL (Type 'exit' to close)";
pub const PROMPT: &str = ">> ";

/// Line that ends the session.
const EXIT: &str = "exit";

/// Run the REPL until `exit` or end of input.
pub fn repl(
    input: &mut impl BufRead,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(output, "{BANNER}")?;
    let mut line = Vec::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            tracing::debug!("end of REPL input");
            break;
        }
        let bytes = line.strip_suffix(b"\n").unwrap_or(&line[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                writeln!(errors, "error in input: line is not UTF-8: {e}")?;
                continue;
            }
        };
        if text == EXIT {
            break;
        }

        tracing::debug!("read line of {} bytes", text.len());
        match read(text) {
            Ok(body) => writeln!(output, "AST:\n{}", render_body(&body))?,
            Err(e) if e.is_incomplete() => writeln!(errors, "incomplete input: {e}")?,
            Err(e) => writeln!(errors, "error in input: {e}")?,
        }
    }
    Ok(())
}
