//! Lisp reader: turns source text into expression trees.
//!
//! The pipeline is text -> tokens ([`lex`]) -> expressions ([`parse`]);
//! [`read`] runs both. Nothing here evaluates.

pub mod data;
pub mod reader;
pub mod repl;

#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "render")]
mod render;
#[cfg(feature = "render")]
pub use render::{render_graphviz, save_graph};

pub use data::{debug_tree, render_body, Expression, ExpressionKind};
pub use reader::{
    lex, parse, read, render_tokens, LexError, ParseError, ReadError, ReadResult, Token, TokenAt,
};
pub use repl::repl;
