//! Render an unevaluated Lisp tree into:
//! - Lisp on stdout, i.e. a mirror of the input
//! - a debug tree on stderr, one node per line.
//!
//! ```ignore
//! <input.lisp lisp_to_debug
//! ```

use std::io::Read;

fn main() -> std::io::Result<()> {
    lithp::logging::init();

    let mut s = String::new();
    std::io::stdin().lock().read_to_string(&mut s)?;

    let result = lithp::read(&s)?;

    for sexpr in result.iter() {
        println!("{}", sexpr);
    }
    eprint!("{}", lithp::debug_tree(&result));
    Ok(())
}
