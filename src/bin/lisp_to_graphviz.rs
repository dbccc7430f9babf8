//! Render an unevaluated Lisp tree as Graphviz.
//!
//! Set `LITHP_SAVE_GRAPH` to also keep the DOT source in a temporary file.
//!
//! Usage:
//!
//! ```ignore
//! <input.lisp lisp_to_graphviz | dot -T png >output.png
//! ```

use std::io::{Read, Write};

fn main() -> std::io::Result<()> {
    lithp::logging::init();

    let mut s = String::new();
    std::io::stdin().lock().read_to_string(&mut s)?;

    let result = lithp::read(&s)?;
    let graphviz = lithp::render_graphviz(&result);

    if std::env::var_os("LITHP_SAVE_GRAPH").is_some() {
        lithp::save_graph(&graphviz)?;
    }

    std::io::stdout().lock().write_all(&graphviz)
}
