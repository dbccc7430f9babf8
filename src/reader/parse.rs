//! Parser from tokens to expressions.
//!
//! ```text
//! program    := expr* EndOfInput
//! expr       := atom | list | quoted
//! list       := LeftParen expr* RightParen
//! quoted     := Quote expr
//! ```

use super::{Expected, ParseError, Position, Token, TokenAt, TokenKind};
use crate::data::Expression;

/// Caller-owned position in a token sequence.
///
/// Running off the end of the slice reads as end-of-input,
/// so a sequence missing its final [`Token::EndOfInput`] still terminates.
struct TokenCursor<'a> {
    tokens: &'a [TokenAt],
    index: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [TokenAt]) -> Self {
        TokenCursor { tokens, index: 0 }
    }

    /// The next token, or None at end of input.
    fn peek(&self) -> Option<&'a TokenAt> {
        self.tokens
            .get(self.index)
            .filter(|t| t.token != Token::EndOfInput)
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Where end-of-input was found, if there is a token marking it.
    fn end_position(&self) -> Option<Position> {
        self.tokens.get(self.index).map(|t| t.at)
    }

    fn advance(&mut self) -> Option<&'a TokenAt> {
        let next = self.peek()?;
        self.index += 1;
        Some(next)
    }

    fn unexpected_end(&self, expected: Expected) -> ParseError {
        ParseError::UnexpectedEnd {
            expected,
            at: self.end_position(),
        }
    }
}

/// Parse the tokens as a sequence of top-level expressions.
pub fn parse(tokens: &[TokenAt]) -> Result<Vec<Expression>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::NoTokens);
    }

    let mut cursor = TokenCursor::new(tokens);
    let mut results = Vec::new();
    while !cursor.at_end() {
        let expr = parse_expr(&mut cursor)?;
        tracing::trace!("parsed top-level {:?} expression", expr.kind());
        results.push(expr);
    }

    tracing::debug!(
        "parsed {} tokens into {} expressions",
        cursor.index,
        results.len()
    );
    Ok(results)
}

/// A list under construction.
///
/// Quote sugar opens a frame that already holds `quote`
/// and closes as soon as its one operand is complete.
struct Frame {
    elements: Vec<Expression>,
    quote: bool,
}

impl Frame {
    fn list() -> Self {
        Frame {
            elements: Vec::new(),
            quote: false,
        }
    }

    fn quote() -> Self {
        Frame {
            elements: vec![Expression::Symbol("quote".to_owned())],
            quote: true,
        }
    }
}

/// Parse a single expression from the cursor position.
///
/// Open lists are kept on an explicit stack rather than the call stack,
/// so nesting depth is bounded only by memory.
fn parse_expr(cursor: &mut TokenCursor<'_>) -> Result<Expression, ParseError> {
    let mut stack: Vec<Frame> = Vec::new();
    loop {
        let open_list = matches!(stack.last(), Some(Frame { quote: false, .. }));
        let mut completed = match cursor.advance() {
            None if open_list => {
                return Err(cursor.unexpected_end(Expected::Token(TokenKind::RightParen)));
            }
            None => return Err(cursor.unexpected_end(Expected::Expression)),
            Some(TokenAt {
                token: Token::RightParen,
                ..
            }) if open_list => {
                Expression::List(stack.pop().map(|f| f.elements).unwrap_or_default())
            }
            Some(TokenAt {
                token: Token::LeftParen,
                ..
            }) => {
                stack.push(Frame::list());
                continue;
            }
            Some(TokenAt {
                token: Token::Quote,
                ..
            }) => {
                stack.push(Frame::quote());
                continue;
            }
            Some(TokenAt { token, at }) => {
                let atom =
                    Expression::from_atom(token).ok_or_else(|| ParseError::UnexpectedToken {
                        expected: Expected::Expression,
                        found: token.kind(),
                        at: *at,
                    })?;
                debug_assert_eq!(token.kind().expression_kind(), Some(atom.kind()));
                atom
            }
        };

        // Hand the finished expression up to the frames waiting on it.
        loop {
            match stack.last().map(|f| f.quote) {
                None => return Ok(completed),
                Some(true) => {
                    if let Some(mut frame) = stack.pop() {
                        frame.elements.push(completed);
                        completed = Expression::List(frame.elements);
                    }
                }
                Some(false) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.elements.push(completed);
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{lex, ReadError};

    fn sym(s: &str) -> Expression {
        Expression::Symbol(s.to_owned())
    }

    fn read(input: &str) -> Result<Vec<Expression>, ReadError> {
        Ok(parse(&lex(input)?)?)
    }

    fn at(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn parse_call() -> Result<(), ReadError> {
        let got = read("(+ 1 2)")?;
        assert_eq!(
            got,
            vec![Expression::List(vec![
                sym("+"),
                Expression::Number(1.0),
                Expression::Number(2.0),
            ])]
        );
        Ok(())
    }

    #[test]
    fn parse_mixed_atoms() -> Result<(), ReadError> {
        let got = read("(a \"hi\" -3.5)")?;
        assert_eq!(
            got,
            vec![Expression::List(vec![
                sym("a"),
                Expression::String("hi".to_owned()),
                Expression::Number(-3.5),
            ])]
        );
        Ok(())
    }

    #[test]
    fn quote_desugars() -> Result<(), ReadError> {
        let got = read("'(a b)")?;
        assert_eq!(
            got,
            vec![Expression::List(vec![
                sym("quote"),
                Expression::List(vec![sym("a"), sym("b")]),
            ])]
        );

        for x in ["x", "12", "\"s\"", "(a (b c))", "()", "'y"] {
            assert_eq!(
                read(&format!("'{x}"))?,
                read(&format!("(quote {x})"))?,
                "quote sugar differs for {x}"
            );
        }
        Ok(())
    }

    #[test]
    fn empty_list_and_nesting() -> Result<(), ReadError> {
        let got = read("() (()) a")?;
        assert_eq!(
            got,
            vec![
                Expression::List(vec![]),
                Expression::List(vec![Expression::List(vec![])]),
                sym("a"),
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_program() -> Result<(), ReadError> {
        assert_eq!(read("")?, vec![]);
        assert_eq!(read("  ; nothing here\n")?, vec![]);
        Ok(())
    }

    #[test]
    fn unclosed_list() {
        match read("(a") {
            Err(ReadError::Parse(ParseError::UnexpectedEnd { expected, at: pos })) => {
                assert_eq!(expected, Expected::Token(TokenKind::RightParen));
                assert_eq!(pos, Some(at(1, 3)));
            }
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn quote_at_end() {
        match read("(a ')") {
            Err(ReadError::Parse(ParseError::UnexpectedToken {
                expected: Expected::Expression,
                found: TokenKind::RightParen,
                at: pos,
            })) => assert_eq!(pos, at(1, 5)),
            v => panic!("unexpected result: {v:?}"),
        }

        match read("'") {
            Err(ReadError::Parse(ParseError::UnexpectedEnd {
                expected: Expected::Expression,
                ..
            })) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn unbalanced_close() {
        match read("a )") {
            Err(ReadError::Parse(ParseError::UnexpectedToken {
                found: TokenKind::RightParen,
                at: pos,
                ..
            })) => assert_eq!(pos, at(1, 3)),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn deep_nesting() -> Result<(), ReadError> {
        let depth = 10_000;
        let input = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let body = read(&input)?;
        assert_eq!(body.len(), 1);

        let mut levels = 0;
        let mut node = &body[0];
        while let [child] = node.children() {
            levels += 1;
            node = child;
        }
        assert_eq!(levels, depth);
        assert_eq!(node, &sym("a"));
        Ok(())
    }

    #[test]
    fn long_quote_chain() -> Result<(), ReadError> {
        let depth = 10_000;
        let body = read(&format!("{}x", "'".repeat(depth)))?;
        assert_eq!(body.len(), 1);

        let mut levels = 0;
        let mut node = &body[0];
        while let [quote, operand] = node.children() {
            assert_eq!(quote, &sym("quote"));
            levels += 1;
            node = operand;
        }
        assert_eq!(levels, depth);
        assert_eq!(node, &sym("x"));
        Ok(())
    }

    #[test]
    fn deep_unclosed_nesting() {
        match read(&"(".repeat(10_000)) {
            Err(ReadError::Parse(ParseError::UnexpectedEnd {
                expected: Expected::Token(TokenKind::RightParen),
                ..
            })) => (),
            v => panic!("unexpected result: {:?}", v.map(|body| body.len())),
        }
    }

    #[test]
    fn no_tokens() {
        assert_eq!(parse(&[]), Err(ParseError::NoTokens));
    }

    #[test]
    fn missing_end_marker() {
        let tokens = vec![
            TokenAt {
                token: Token::LeftParen,
                at: at(1, 1),
            },
            TokenAt {
                token: Token::Symbol("a".to_owned()),
                at: at(1, 2),
            },
        ];
        assert_eq!(
            parse(&tokens),
            Err(ParseError::UnexpectedEnd {
                expected: Expected::Token(TokenKind::RightParen),
                at: None,
            })
        );

        let tokens = vec![TokenAt {
            token: Token::Number(4.0),
            at: at(1, 1),
        }];
        assert_eq!(parse(&tokens), Ok(vec![Expression::Number(4.0)]));
    }

    #[test]
    fn stops_at_end_marker() {
        let tokens = vec![
            TokenAt {
                token: Token::Symbol("a".to_owned()),
                at: at(1, 1),
            },
            TokenAt {
                token: Token::EndOfInput,
                at: at(1, 2),
            },
            TokenAt {
                token: Token::RightParen,
                at: at(1, 2),
            },
        ];
        assert_eq!(parse(&tokens), Ok(vec![sym("a")]));
    }
}
