//! Render expression trees as Graphviz.
//!
//! Every expression becomes a node with an HTML table label:
//! a header row with the expression kind, then either the atom's value
//! or one row per list element. List rows are ports, with an edge from
//! each port to the element's own node.

use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

use dot_writer::{Attributes, DotWriter};
use maud::PreEscaped;

use crate::data::Expression;

fn node_name(id: usize) -> String {
    format!("expr{id}")
}

fn render_element(i: usize, child: &Expression) -> PreEscaped<String> {
    let summary = if child.is_atom() {
        child.to_string()
    } else {
        format!("{} ({})", child.kind(), child.children().len())
    };
    maud::html!(tr {
        td { (i) }
        td port=(format!("port{i}")) { (summary) }
    })
}

fn render_label(expr: &Expression) -> String {
    let table = match expr {
        Expression::List(children) => maud::html!(
            table border="0" cellborder="1" cellspacing="0" {
                tr { td colspan="2" { b { (expr.kind()) } } }
                @for (i, child) in children.iter().enumerate() {
                    (render_element(i, child))
                }
            }
        ),
        _ => maud::html!(
            table border="0" cellborder="1" cellspacing="0" {
                tr { td { b { (expr.kind()) } } }
                tr { td { (expr) } }
            }
        ),
    };
    format!("<{}>", table.into_string())
}

/// Render a body of expressions into a Graphviz digraph.
pub fn render_graphviz(body: &[Expression]) -> Vec<u8> {
    let mut outbuf = Vec::new();
    {
        let mut writer = DotWriter::from(&mut outbuf);
        let mut graph = writer.digraph();

        let mut next_id = 0;
        let mut queue = VecDeque::new();
        for expr in body {
            queue.push_back((expr, next_id));
            next_id += 1;
        }

        while let Some((expr, id)) = queue.pop_front() {
            let mut node = graph.node_named(node_name(id));
            node.set_shape(dot_writer::Shape::None);
            node.set_html(&render_label(expr));

            let ports: Vec<_> = (0..expr.children().len())
                .map(|i| node.id().port(&format!("port{i}")))
                .collect();
            std::mem::drop(node);

            for (child, port) in expr.children().iter().zip(ports) {
                graph.edge(port, node_name(next_id));
                queue.push_back((child, next_id));
                next_id += 1;
            }
        }
        tracing::debug!("rendered {next_id} expression nodes");
    }
    outbuf
}

/// Keep a copy of Graphviz source in a temporary file, returning its path.
pub fn save_graph(gv: &[u8]) -> std::io::Result<PathBuf> {
    let mut f = tempfile::NamedTempFile::new()?;
    f.write_all(gv)?;
    let (_, pathbuf) = f.keep()?;
    tracing::info!("DOT source in {}", pathbuf.display());
    Ok(pathbuf)
}
