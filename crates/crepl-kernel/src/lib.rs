//! crepl-kernel: the core of crepl.
//!
//! This crate provides:
//!
//! - **Lexer**: tokenizes C-family source text using logos
//! - **Validator**: incremental input-completeness checking for the REPL
//!
//! The validator is the gatekeeper between the line-oriented prompt and the
//! evaluator: it decides whether accumulated input is ready to submit, needs
//! another line, or is already structurally broken.

pub mod lexer;
pub mod validator;
