//! Lisp expression trees.
//!
//! An [`Expression`] is built bottom-up by the parser and not modified afterwards.
//! The Display implementation renders the expression as a string
//! that reads back as the same tree.
//!
//! Limitations:
//! - Only f64 numbers are supported.
//! - Strings are kept as written: escapes are not interpreted, and not re-escaped on output.

mod debug;

pub use debug::debug_tree;

use crate::reader::{Token, TokenKind};

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Symbol(String),
    Number(f64),
    String(String),
    List(Vec<Expression>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Symbol,
    Number,
    String,
    List,
}

impl std::fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpressionKind::Symbol => "SYMBOL",
            ExpressionKind::Number => "NUMBER",
            ExpressionKind::String => "STRING",
            ExpressionKind::List => "LIST",
        };
        f.write_str(s)
    }
}

impl TokenKind {
    /// The kind of expression an atom token becomes;
    /// None for structural tokens.
    pub fn expression_kind(self) -> Option<ExpressionKind> {
        match self {
            TokenKind::Symbol => Some(ExpressionKind::Symbol),
            TokenKind::Number => Some(ExpressionKind::Number),
            TokenKind::String => Some(ExpressionKind::String),
            TokenKind::LeftParen | TokenKind::RightParen | TokenKind::Quote => None,
            TokenKind::EndOfInput => None,
        }
    }
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Symbol(_) => ExpressionKind::Symbol,
            Expression::Number(_) => ExpressionKind::Number,
            Expression::String(_) => ExpressionKind::String,
            Expression::List(_) => ExpressionKind::List,
        }
    }

    /// Convert an atom token into the expression carrying the same value.
    pub fn from_atom(token: &Token) -> Option<Expression> {
        match token {
            Token::Symbol(s) => Some(Expression::Symbol(s.clone())),
            Token::Number(n) => Some(Expression::Number(*n)),
            Token::String(s) => Some(Expression::String(s.clone())),
            Token::LeftParen | Token::RightParen | Token::Quote | Token::EndOfInput => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        !matches!(self, Expression::List(_))
    }

    /// Child expressions; empty for atoms.
    pub fn children(&self) -> &[Expression] {
        match self {
            Expression::List(children) => children,
            _ => &[],
        }
    }
}

// Deep trees are dropped with an explicit stack instead of recursion.
impl Drop for Expression {
    fn drop(&mut self) {
        if let Expression::List(children) = self {
            let mut pending = std::mem::take(children);
            while let Some(mut child) = pending.pop() {
                if let Expression::List(grandchildren) = &mut child {
                    pending.append(grandchildren);
                }
            }
        }
    }
}

/// Pending output while rendering an expression.
enum Piece<'a> {
    Expr(&'a Expression),
    Space,
    Close,
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Expr(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Space => f.write_str(" ")?,
                Piece::Close => f.write_str(")")?,
                Piece::Expr(Expression::Symbol(s)) => write!(f, "{s}")?,
                Piece::Expr(Expression::Number(n)) => write!(f, "{n}")?,
                Piece::Expr(Expression::String(s)) => write!(f, "\"{s}\"")?,
                Piece::Expr(Expression::List(children)) => {
                    f.write_str("(")?;
                    pending.push(Piece::Close);
                    for (i, child) in children.iter().enumerate().rev() {
                        pending.push(Piece::Expr(child));
                        if i > 0 {
                            pending.push(Piece::Space);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Render a body of top-level expressions, one per line.
pub fn render_body(body: &[Expression]) -> String {
    body.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{read, ReadResult};

    #[test]
    fn render_atoms() {
        assert_eq!(Expression::Symbol("a-b".to_owned()).to_string(), "a-b");
        assert_eq!(Expression::Number(1.0).to_string(), "1");
        assert_eq!(Expression::Number(-3.5).to_string(), "-3.5");
        assert_eq!(
            Expression::String(r#"say \"hi\""#.to_owned()).to_string(),
            r#""say \"hi\"""#
        );
    }

    #[test]
    fn render_nested() -> ReadResult<()> {
        let body = read("(define (f x) 'x)  \"top\"\n\n 12")?;
        assert_eq!(
            render_body(&body),
            "(define (f x) (quote x))\n\"top\"\n12"
        );
        Ok(())
    }

    #[test]
    fn rendered_text_reads_back() -> ReadResult<()> {
        for input in [
            "(+ 1 2)",
            "'(a b)",
            "(a \"hi\" -3.5)",
            r#"("esc\"aped" "back\\" (()))"#,
            "x ; comment\n(y 0.25)",
        ] {
            let first = read(input)?;
            let second = read(&render_body(&first))?;
            assert_eq!(first, second, "round trip failed for {input:?}");
        }
        Ok(())
    }

    #[test]
    fn deep_tree_renders_and_drops() -> ReadResult<()> {
        let depth = 10_000;
        let input = format!("{}1 'x{}", "(".repeat(depth), ")".repeat(depth));
        let body = read(&input)?;
        let rendered = render_body(&body);
        assert_eq!(
            rendered,
            format!("{}1 (quote x){}", "(".repeat(depth), ")".repeat(depth))
        );
        drop(body);
        Ok(())
    }

    #[test]
    fn atom_kinds_map_to_expression_kinds() {
        assert_eq!(
            TokenKind::Symbol.expression_kind(),
            Some(ExpressionKind::Symbol)
        );
        assert_eq!(
            TokenKind::Number.expression_kind(),
            Some(ExpressionKind::Number)
        );
        assert_eq!(
            TokenKind::String.expression_kind(),
            Some(ExpressionKind::String)
        );
        for kind in [
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Quote,
            TokenKind::EndOfInput,
        ] {
            assert_eq!(kind.expression_kind(), None);
        }

        for token in [
            Token::Symbol("s".to_owned()),
            Token::Number(2.0),
            Token::String("t".to_owned()),
        ] {
            let expr = Expression::from_atom(&token).unwrap();
            assert_eq!(Some(expr.kind()), token.kind().expression_kind());
            assert!(expr.is_atom());
            assert!(expr.children().is_empty());
        }
        assert_eq!(Expression::from_atom(&Token::Quote), None);
    }
}
