//! The incremental validator session.
//!
//! One `InputValidator` per interactive session-slot. Nesting state and the
//! accumulated submission persist across `validate` calls so a user can type
//! one bracket per line; `reset` is the only session boundary.

use crate::lexer::{self, TokenKind};

use super::nesting::{
    closer_for, ends_conditional, is_closer, opener_for, opens_conditional, NestingStack, Opener,
};

/// Classification of accumulated input after a `validate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// Balanced and submittable.
    Complete,
    /// Needs more text before it can be evaluated.
    Incomplete,
    /// Structurally broken; the session should be reset.
    Invalid,
    /// Reserved for future use; never produced by the current algorithm.
    Unknown,
}

impl Default for ValidationState {
    fn default() -> Self {
        ValidationState::Complete
    }
}

/// Stateful completeness checker for freshly typed source fragments.
///
/// Each `validate` call tokenizes its fragment in isolation but interprets
/// the tokens against the nesting stack carried over from previous calls.
/// The fragment is appended to the pending submission either way, including
/// after an `Invalid` classification; callers recover by calling [`reset`].
///
/// Not reentrant: one instance belongs to exactly one session at a time.
///
/// [`reset`]: InputValidator::reset
#[derive(Debug, Default)]
pub struct InputValidator {
    /// The submission being collected.
    input: String,
    /// Bracket and conditional nesting carried across calls.
    stack: NestingStack,
    /// Result of the most recent `validate` call.
    last: ValidationState,
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one fragment and classify the session's accumulated input.
    pub fn validate(&mut self, text: &str) -> ValidationState {
        let tokens = lexer::scan(text);
        let mut result = ValidationState::Complete;
        let mut last_seen: Option<TokenKind> = None;

        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            let mut consumed = token.kind;

            if let Some(opener) = opener_for(token.kind) {
                self.stack.push(opener);
            } else if is_closer(token.kind) {
                let expected = self.stack.top().and_then(closer_for);
                if expected != Some(token.kind) {
                    result = ValidationState::Invalid;
                } else {
                    let popped = self.stack.pop();
                    // A closing brace also clears a template '<' left
                    // dangling directly beneath it.
                    if popped == Some(Opener::Brace)
                        && self.stack.depth() == 1
                        && self.stack.top() == Some(Opener::Generic)
                    {
                        self.stack.pop();
                    }
                }
            } else if token.kind == TokenKind::Hash {
                // Read the directive name as raw text; prefix rules decide
                // whether it opens or closes a conditional block.
                if let Some(name) = iter.next() {
                    consumed = name.kind;
                    let spelling = name.span.slice(text);
                    if opens_conditional(spelling) {
                        self.stack.push(Opener::Conditional);
                    } else if ends_conditional(spelling) {
                        if self.stack.top() == Some(Opener::Conditional) {
                            self.stack.pop();
                        } else {
                            result = ValidationState::Invalid;
                        }
                    }
                }
            }

            last_seen = Some(consumed);
            if result == ValidationState::Invalid {
                break;
            }
        }

        // A trailing comma means the user intends to continue, regardless of
        // bracket balance.
        let should_continue = last_seen == Some(TokenKind::Comma);
        if result != ValidationState::Invalid && (should_continue || !self.stack.is_empty()) {
            result = ValidationState::Incomplete;
        }

        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(text);
        self.last = result;

        tracing::trace!(?result, depth = self.stack.depth(), "validated fragment");
        result
    }

    /// End the current session.
    ///
    /// With `Some(out)` the pending submission is moved into `out`, which
    /// must be empty on entry; with `None` it is discarded. The nesting
    /// stack is cleared and the last state returns to `Complete`.
    pub fn reset(&mut self, out: Option<&mut String>) {
        match out {
            Some(out) => {
                assert!(out.is_empty(), "InputValidator::reset got a non-empty buffer");
                std::mem::swap(out, &mut self.input);
            }
            None => self.input.clear(),
        }
        self.stack.clear();
        self.last = ValidationState::Complete;
    }

    /// The submission collected since the last reset.
    pub fn pending(&self) -> &str {
        &self.input
    }

    /// Result of the most recent `validate` call.
    pub fn last_state(&self) -> ValidationState {
        self.last
    }

    /// Current nesting depth, brackets and conditionals combined.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_input_is_complete() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("int x = f(a[0], {1, 2});"), ValidationState::Complete);
        assert_eq!(v.depth(), 0);
    }

    #[test]
    fn open_bracket_is_incomplete() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("{"), ValidationState::Incomplete);
        assert_eq!(v.depth(), 1);
    }

    #[test]
    fn unmatched_closer_is_invalid() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("}}"), ValidationState::Invalid);
    }

    #[test]
    fn wrong_closer_kind_is_invalid() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("(]"), ValidationState::Invalid);
    }

    #[test]
    fn invalid_short_circuits_the_call() {
        let mut v = InputValidator::new();
        // The ')' after the mismatch must not repair the result.
        assert_eq!(v.validate("(])"), ValidationState::Invalid);
        // Mismatched closers do not pop: the '(' is still open.
        assert_eq!(v.depth(), 1);
    }

    #[test]
    fn trailing_comma_forces_continuation() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("f(1,"), ValidationState::Incomplete);

        let mut v = InputValidator::new();
        assert_eq!(v.validate("a = 1,"), ValidationState::Incomplete);
    }

    #[test]
    fn comma_inside_comment_does_not_continue() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("x = 1; // a, b,"), ValidationState::Complete);
    }

    #[test]
    fn session_spans_multiple_calls() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("a = (1"), ValidationState::Incomplete);
        assert_eq!(v.validate(")"), ValidationState::Complete);
        assert_eq!(v.pending(), "a = (1\n)");
    }

    #[test]
    fn conditional_directives_nest() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("#if DEBUG"), ValidationState::Incomplete);
        assert_eq!(v.validate("int x = 1;"), ValidationState::Incomplete);
        assert_eq!(v.validate("#endif"), ValidationState::Complete);
    }

    #[test]
    fn unmatched_endif_is_invalid() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("#endif"), ValidationState::Invalid);
    }

    #[test]
    fn endif_does_not_pop_brackets() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate("("), ValidationState::Incomplete);
        assert_eq!(v.validate("#endif"), ValidationState::Invalid);
    }

    #[test]
    fn brace_merge_pops_seeded_generic() {
        let mut v = InputValidator::new();
        v.stack.push(Opener::Generic);
        assert_eq!(v.validate("{"), ValidationState::Incomplete);
        assert_eq!(v.validate("}"), ValidationState::Complete);
        assert_eq!(v.depth(), 0);
    }

    #[test]
    fn brace_merge_needs_exactly_one_entry_beneath() {
        let mut v = InputValidator::new();
        v.stack.push(Opener::Paren);
        v.stack.push(Opener::Generic);
        v.stack.push(Opener::Brace);
        assert_eq!(v.validate("}"), ValidationState::Incomplete);
        // Two entries remained after the brace pop, so the template '<'
        // survives.
        assert_eq!(v.depth(), 2);
    }

    #[test]
    fn fragment_is_accumulated_even_when_invalid() {
        let mut v = InputValidator::new();
        assert_eq!(v.validate(")"), ValidationState::Invalid);
        assert_eq!(v.pending(), ")");
        assert_eq!(v.last_state(), ValidationState::Invalid);
    }

    #[test]
    fn reset_discards_and_restores_freshness() {
        let mut v = InputValidator::new();
        v.validate("((,");
        v.reset(None);
        assert_eq!(v.pending(), "");
        assert_eq!(v.depth(), 0);
        assert_eq!(v.last_state(), ValidationState::Complete);
        assert_eq!(v.validate(""), ValidationState::Complete);
        assert_eq!(v.pending(), "");
    }

    #[test]
    fn reset_swaps_into_caller_buffer() {
        let mut v = InputValidator::new();
        v.validate("int y = 2;");
        let mut out = String::new();
        v.reset(Some(&mut out));
        assert_eq!(out, "int y = 2;");
        assert_eq!(v.pending(), "");
    }

    #[test]
    #[should_panic(expected = "non-empty buffer")]
    fn reset_rejects_non_empty_buffer() {
        let mut v = InputValidator::new();
        let mut out = String::from("leftover");
        v.reset(Some(&mut out));
    }
}
