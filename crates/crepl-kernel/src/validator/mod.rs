//! Incremental input-completeness validation for the REPL.
//!
//! The validator sits between the prompt and the evaluator and decides, after
//! each typed fragment, whether the accumulated input:
//!
//! - **Complete**: brackets and conditionals balance; submit it
//! - **Incomplete**: something is still open (or a trailing comma asks for
//!   more); prompt for another line
//! - **Invalid**: a closer never had a matching opener; report and reset
//!
//! It tracks three bracket families plus a separate `#if`/`#endif` channel on
//! one LIFO stack, carried across calls until `reset`. No parsing happens
//! here; the classification works from the forward token stream alone.
//!
//! # Example
//!
//! ```
//! use crepl_kernel::validator::{InputValidator, ValidationState};
//!
//! let mut validator = InputValidator::new();
//! assert_eq!(validator.validate("int sum(int a,"), ValidationState::Incomplete);
//! assert_eq!(validator.validate("int b) { return a + b; }"), ValidationState::Complete);
//!
//! let mut submission = String::new();
//! validator.reset(Some(&mut submission));
//! assert_eq!(submission, "int sum(int a,\nint b) { return a + b; }");
//! ```

mod nesting;
mod session;

pub use nesting::{NestingStack, Opener};
pub use session::{InputValidator, ValidationState};
