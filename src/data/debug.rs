//! Indented dump of an expression tree, one node per line.

use std::fmt::{Display, Formatter, Result};

use super::Expression;

const INDENT: &str = "    ";

/// Describe each expression on its own line, nesting list children by depth.
///
/// ```text
/// LIST (
///     SYMBOL +
///     NUMBER 1
/// )
/// ```
pub fn debug_tree(body: &[Expression]) -> String {
    DebugTree(body).to_string()
}

struct DebugTree<'a>(&'a [Expression]);

enum Line<'a> {
    Node(&'a Expression),
    Close,
}

impl Display for DebugTree<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut pending: Vec<(Line<'_>, usize)> =
            self.0.iter().rev().map(|expr| (Line::Node(expr), 0)).collect();
        while let Some((line, depth)) = pending.pop() {
            let indent = INDENT.repeat(depth);
            let expr = match line {
                Line::Close => {
                    writeln!(f, "{indent})")?;
                    continue;
                }
                Line::Node(expr) => expr,
            };
            match expr {
                Expression::List(children) => {
                    writeln!(f, "{indent}{} (", expr.kind())?;
                    pending.push((Line::Close, depth));
                    pending.extend(children.iter().rev().map(|c| (Line::Node(c), depth + 1)));
                }
                Expression::Symbol(v) | Expression::String(v) => {
                    writeln!(f, "{indent}{} {v}", expr.kind())?
                }
                Expression::Number(v) => writeln!(f, "{indent}{} {v}", expr.kind())?,
            }
        }
        Ok(())
    }
}
