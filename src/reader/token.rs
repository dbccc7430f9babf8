//! Module for extracting Lisp tokens from an input string.

use super::{Cursor, LexError, Position};

/// A Lisp token.
///
/// Whitespace and comments are ignored.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Token {
    Symbol(String),
    Number(f64),
    String(String),
    LeftParen,
    RightParen,
    Quote,
    EndOfInput,
}

/// The kind of a token, without its content.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Symbol,
    Number,
    String,
    LeftParen,
    RightParen,
    Quote,
    EndOfInput,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Symbol(_) => TokenKind::Symbol,
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Quote => TokenKind::Quote,
            Token::EndOfInput => TokenKind::EndOfInput,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::Quote => "`'`",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(s)
    }
}

/// A token along with its starting position in the input.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct TokenAt {
    pub token: Token,
    pub at: Position,
}

impl From<TokenAt> for Token {
    fn from(value: TokenAt) -> Self {
        value.token
    }
}

/// Split the input into its constituent tokens.
///
/// The result always ends with a single [`Token::EndOfInput`].
pub fn lex(input: &str) -> Result<Vec<TokenAt>, LexError> {
    let mut cursor = Cursor::new(input);
    let mut result = Vec::new();

    while !cursor.is_at_end() {
        if let Some(token) = next_token(&mut cursor)? {
            tracing::trace!("token {:?} at {}", token.token, token.at);
            result.push(token);
        }
    }
    result.push(TokenAt {
        token: Token::EndOfInput,
        at: cursor.position(),
    });

    tracing::debug!("lexed {} bytes into {} tokens", cursor.offset(), result.len());
    Ok(result)
}

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn space() -> &'static Regex {
        static SPACE: OnceLock<Regex> = OnceLock::new();
        SPACE.get_or_init(|| Regex::new(r"\A\s+").expect("could not compile regex for space"))
    }

    pub(super) fn comment() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A;[^\n]*\n?").expect("could not compile regex for comment")
        })
    }

    pub(super) fn string() -> &'static Regex {
        static STRING: OnceLock<Regex> = OnceLock::new();
        STRING.get_or_init(|| {
            // Quote,
            // followed by:
            //  - a backslash + character (an escaped character, of any sort), or
            //  - any character other than a quote or backslash
            // repeatedly.
            // The closing quote is checked after the match,
            // so that a missing one can be reported.
            Regex::new(r#"\A(?s)"(?:\\.|[^"\\])*"#).expect("could not compile regex for string")
        })
    }

    pub(super) fn number() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A-?[0-9]+(?:\.[0-9]+)?").expect("could not compile regex for number")
        })
    }

    pub(super) fn symbol() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        // Printable ASCII, except for ' ( ) ; and "
        MATCH.get_or_init(|| {
            Regex::new(r"\A[!#-&*-:<-~]+").expect("could not compile regex for symbol")
        })
    }
}

/// Scan from the cursor to the end of the next token.
/// Returns None if only whitespace or a comment was consumed.
fn next_token(cursor: &mut Cursor<'_>) -> Result<Option<TokenAt>, LexError> {
    let at = cursor.position();
    let rest = cursor.rest();
    let Some(first) = cursor.peek() else {
        return Ok(None);
    };

    // Single-character matchers:
    if let Some(token) = match first {
        '(' => Some(Token::LeftParen),
        ')' => Some(Token::RightParen),
        '\'' => Some(Token::Quote),
        _ => None,
    } {
        cursor.advance(1);
        return Ok(Some(TokenAt { token, at }));
    }

    // Regex matchers:
    if let Some(m) = regex::space()
        .find(rest)
        .or_else(|| regex::comment().find(rest))
    {
        cursor.advance(m.len());
        return Ok(None);
    }

    if first == '"' {
        let s = regex::string()
            .find(rest)
            .expect("internal error: string regex did not match at a quote")
            .as_str();
        if !rest[s.len()..].starts_with('"') {
            return Err(LexError::UnclosedString { at });
        }
        cursor.advance(s.len() + 1);
        return Ok(Some(TokenAt {
            token: Token::String(s[1..].to_owned()),
            at,
        }));
    }

    let starts_number = first.is_ascii_digit()
        || (first == '-' && matches!(cursor.peek_second(), Some(c) if c.is_ascii_digit()));
    if starts_number {
        return lex_number(cursor).map(Some);
    }

    if let Some(m) = regex::symbol().find(rest) {
        let s = cursor.advance(m.len());
        return Ok(Some(TokenAt {
            token: Token::Symbol(s.to_owned()),
            at,
        }));
    }

    Err(LexError::UnsupportedCharacter { ch: first, at })
}

/// Lex a number starting at the cursor. All numbers are floating point.
fn lex_number(cursor: &mut Cursor<'_>) -> Result<TokenAt, LexError> {
    let at = cursor.position();
    let rest = cursor.rest();
    let text = regex::number()
        .find(rest)
        .expect("internal error: number regex did not match at a digit")
        .as_str();

    if rest[text.len()..].starts_with('.') {
        let text = text.to_owned();
        return Err(if text.contains('.') {
            LexError::SecondDecimalPoint { text, at }
        } else {
            LexError::MissingFraction { text, at }
        });
    }

    // Digits beyond the f64 range parse as infinity, which has no literal spelling.
    let number = text
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| LexError::NumberOutOfRange {
            text: text.to_owned(),
            at,
        })?;
    cursor.advance(text.len());
    Ok(TokenAt {
        token: Token::Number(number),
        at,
    })
}

/// Render tokens back into text.
///
/// Items inside a list are separated by spaces, top-level items by newlines.
pub fn render_tokens(tokens: &[TokenAt]) -> String {
    let mut result = String::new();
    let mut depth: usize = 0;

    for (i, TokenAt { token, .. }) in tokens.iter().enumerate() {
        match token {
            Token::Symbol(s) => result.push_str(s),
            Token::Number(n) => result.push_str(&n.to_string()),
            Token::String(s) => {
                result.push('"');
                result.push_str(s);
                result.push('"');
            }
            Token::Quote => {
                result.push('\'');
                continue;
            }
            Token::LeftParen => {
                result.push('(');
                depth += 1;
                continue;
            }
            Token::RightParen => {
                result.push(')');
                depth = depth.saturating_sub(1);
            }
            Token::EndOfInput => continue,
        }

        let separate = matches!(
            tokens.get(i + 1).map(|t| &t.token),
            Some(next) if !matches!(next, Token::RightParen | Token::EndOfInput)
        );
        if separate {
            result.push(if depth > 0 { ' ' } else { '\n' });
        }
    }

    result
}
