//! Caller-owned scan position over an input string.

use super::Position;

/// A position in an input string, along with the input itself.
///
/// The offset only moves forward; the lexer never backtracks.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            offset: 0,
            position: Position::default(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Byte offset of the cursor into the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line and column of the next unread character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The unread remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the next one.
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Move past the next `len` bytes of input, returning them.
    ///
    /// `len` must fall on a character boundary.
    pub fn advance(&mut self, len: usize) -> &'a str {
        let consumed = &self.rest()[..len];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.offset += len;
        consumed
    }
}
