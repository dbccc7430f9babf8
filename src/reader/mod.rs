//! Support for reading Lisp expressions from strings.
//!
//! Reading happens in two passes over the whole input:
//! [`lex`] splits the text into tokens, and [`parse`] assembles the tokens
//! into a sequence of top-level [`Expression`]s.
//! Each pass owns its own cursor, so any number of reads may run at once.

use std::io::ErrorKind;

use crate::data::Expression;

mod cursor;
mod parse;
mod token;

pub use cursor::Cursor;
pub use parse::parse;
pub use token::{lex, render_tokens, Token, TokenAt, TokenKind};

/// Parse the string as a list of Lisp expressions (i.e. a body).
pub fn read(input: &str) -> ReadResult<Vec<Expression>> {
    let tokens = lex(input)?;
    let body = parse(&tokens)?;
    Ok(body)
}

/// Location of a character or token in the input.
/// Lines and columns are 1-indexed; columns count characters, not bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Error from splitting text into tokens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unsupported character {ch:?} at {at}")]
    UnsupportedCharacter { ch: char, at: Position },

    #[error("unclosed string starting at {at}")]
    UnclosedString { at: Position },

    #[error("malformed number {text:?} at {at}: a decimal point must be followed by a digit")]
    MissingFraction { text: String, at: Position },

    #[error("malformed number {text:?} at {at}: numbers can have only one decimal point")]
    SecondDecimalPoint { text: String, at: Position },

    #[error("number {text:?} at {at} is too large to represent")]
    NumberOutOfRange { text: String, at: Position },
}

/// What the parser was looking for when it failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Expected {
    Expression,
    Token(TokenKind),
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Expression => write!(f, "an expression"),
            Expected::Token(kind) => write!(f, "{kind}"),
        }
    }
}

/// Error from assembling tokens into expressions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("no tokens to parse")]
    NoTokens,

    #[error("expected {expected}, found end of input{}", .at.map(|at| format!(" at {at}")).unwrap_or_default())]
    UnexpectedEnd {
        expected: Expected,
        at: Option<Position>,
    },

    #[error("expected {expected}, found {found} at {at}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        at: Position,
    },
}

/// Error type if a read does not complete.
///
/// A reader may experience a true tokenizing/parsing error, e.g. "())", that no additional input can fix.
/// This is distinct from a reader that gets an unexpected end-of-input, e.g. "(()":
/// it may be that more input will fix the issue. [`ReadError::is_incomplete`] tells the two apart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ReadError {
    /// True if more input could complete the read.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            ReadError::Lex(LexError::UnclosedString { .. })
                | ReadError::Parse(ParseError::UnexpectedEnd { .. })
        )
    }
}

/// The main result type for this module:
/// a T (token, expression, etc), or an error.
pub type ReadResult<T> = Result<T, ReadError>;

impl From<ReadError> for std::io::Error {
    fn from(value: ReadError) -> Self {
        let kind = if value.is_incomplete() {
            ErrorKind::UnexpectedEof
        } else {
            ErrorKind::InvalidInput
        };
        std::io::Error::new(kind, value)
    }
}
