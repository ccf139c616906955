//! Lexer for C-family source fragments.
//!
//! Produces a forward-only stream of classified tokens with byte spans using
//! logos. The validator only cares about a handful of kinds (brackets, comma,
//! `#`); everything else is classified coarsely so that arbitrary snippets
//! still tokenize. The raw spelling of any token is recoverable by slicing
//! the source with its span, which is how directive names after `#` are read.

use logos::Logos;
use thiserror::Error;

/// Byte range of a token in its source fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The raw spelling of this span in `source`.
    pub fn slice<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start..self.end]
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self { start: range.start, end: range.end }
    }
}

/// Classified lexical units of C-family source.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum TokenKind {
    #[token("[")]
    LSquare,
    #[token("]")]
    RSquare,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Preprocessor markers. `##` (paste) must not read as two directive
    // introducers.
    #[token("#")]
    Hash,
    #[token("##")]
    HashHash,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // pp-number shape: digits with embedded letters, dots, and digit
    // separators. Exponent signs split into an Op, which is harmless here.
    #[regex(r"[0-9][0-9A-Za-z_.']*")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    Str,
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    CharLit,

    // Operator soup. None of these affect nesting. Slash is separate:
    // `//` and `/*` must lex as comment skips, never as an operator run.
    #[regex(r"[!%&*+\-.:=?@^|~\\]+")]
    Op,
    #[token("/")]
    Slash,

    /// Unrecognized input, produced only by [`scan`].
    Unknown,
}

/// A token plus its location in the scanned fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lex error with the offending slice and its location.
#[derive(Debug, Clone, Error)]
#[error("unrecognized input `{slice}` at byte {}..{}", span.start, span.end)]
pub struct LexError {
    pub slice: String,
    pub span: Span,
}

/// Tokenize `source`, mapping unrecognized bytes to [`TokenKind::Unknown`].
///
/// This is the entry point the validator uses: it never fails, so half-typed
/// input with stray bytes still gets a completeness classification.
pub fn scan(source: &str) -> Vec<SpannedToken> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Unknown);
        tokens.push(SpannedToken { kind, span: lexer.span().into() });
    }
    tokens
}

/// Tokenize `source`, failing on the first unrecognized slice.
///
/// Used by the front-end to surface lexical problems before a completed
/// submission is handed to the evaluator.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(SpannedToken { kind, span: lexer.span().into() }),
            Err(()) => {
                return Err(LexError {
                    slice: lexer.slice().to_string(),
                    span: lexer.span().into(),
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn brackets_and_comma() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(x[0], {1})"),
            vec![
                Ident, LParen, Ident, LSquare, Number, RSquare, Comma, LBrace, Number, RBrace,
                RParen
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("a // (((\nb /* {{{ */ c"), vec![Ident, Ident, Ident]);
        assert_eq!(kinds("/* nested * stars **/ x"), vec![Ident]);
    }

    #[test]
    fn brackets_inside_literals_do_not_count() {
        use TokenKind::*;
        assert_eq!(kinds(r#"puts("({[")"#), vec![Ident, LParen, Str, RParen]);
        assert_eq!(kinds("'('"), vec![CharLit]);
    }

    #[test]
    fn hash_and_directive_name() {
        use TokenKind::*;
        assert_eq!(kinds("#if DEBUG"), vec![Hash, Ident, Ident]);
        assert_eq!(kinds("a ## b"), vec![Ident, HashHash, Ident]);
    }

    #[test]
    fn spans_recover_raw_text() {
        let source = "#ifdef FOO";
        let tokens = scan(source);
        assert_eq!(tokens[1].span.slice(source), "ifdef");
    }

    #[test]
    fn template_angles_lex_individually() {
        use TokenKind::*;
        assert_eq!(kinds("vector<int>"), vec![Ident, Less, Ident, Greater]);
    }

    #[test]
    fn scan_is_total_on_garbage() {
        let tokens = scan("a \u{1F980} b");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Unknown));
    }

    #[test]
    fn tokenize_rejects_garbage() {
        assert!(tokenize("int x;").is_ok());
        let err = match tokenize("x \u{1F980}") {
            Err(e) => e,
            Ok(_) => panic!("expected lex error"),
        };
        assert!(err.to_string().contains("unrecognized"));
    }
}
