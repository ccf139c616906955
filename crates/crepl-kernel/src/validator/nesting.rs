//! Nesting primitives: opener kinds, the opener→closer table, and the
//! LIFO stack the validator carries across calls.

use crate::lexer::TokenKind;

/// Kinds that can sit on the nesting stack.
///
/// Three bracket families, a dangling template `<`, and a synthetic marker
/// for an open `#if` conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener {
    Square,
    Brace,
    Paren,
    /// A template parameter list whose `>` was never typed. Nothing pushes
    /// this during scanning; the brace merge rule still clears it when a
    /// host seeds it (see `InputValidator::validate`).
    Generic,
    /// Pushed on `#if`/`#ifdef`/`#ifndef`, popped by `#endif`.
    Conditional,
}

/// The opener that a bracket token begins, if any.
pub fn opener_for(kind: TokenKind) -> Option<Opener> {
    match kind {
        TokenKind::LSquare => Some(Opener::Square),
        TokenKind::LBrace => Some(Opener::Brace),
        TokenKind::LParen => Some(Opener::Paren),
        _ => None,
    }
}

/// The closer token that matches an opener.
///
/// `Generic` and `Conditional` have no closer token: the former is only
/// cleared by the brace merge rule, the latter by `#endif`.
pub fn closer_for(opener: Opener) -> Option<TokenKind> {
    match opener {
        Opener::Square => Some(TokenKind::RSquare),
        Opener::Brace => Some(TokenKind::RBrace),
        Opener::Paren => Some(TokenKind::RParen),
        Opener::Generic | Opener::Conditional => None,
    }
}

/// Whether a token is a bracket closer.
pub fn is_closer(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::RSquare | TokenKind::RBrace | TokenKind::RParen)
}

/// Directive name check: does this spelling open a conditional block?
///
/// Prefix match on purpose: it covers `if`, `ifdef`, and `ifndef` the same
/// way the underlying preprocessor groups them.
pub fn opens_conditional(name: &str) -> bool {
    name.starts_with("if")
}

/// Directive name check: does this spelling end a conditional block?
///
/// `endif` must stand on a word boundary: end of the spelling, a `/`, or
/// whitespace. `endif_guard` is an ordinary identifier, not a directive end.
pub fn ends_conditional(name: &str) -> bool {
    name.starts_with("endif")
        && match name.as_bytes().get(5) {
            None => true,
            Some(&b) => b == b'/' || b.is_ascii_whitespace(),
        }
}

/// LIFO stack of opener kinds, carried across `validate` calls.
#[derive(Debug, Default)]
pub struct NestingStack {
    items: Vec<Opener>,
}

impl NestingStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, opener: Opener) {
        self.items.push(opener);
    }

    pub fn pop(&mut self) -> Option<Opener> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<Opener> {
        self.items.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
