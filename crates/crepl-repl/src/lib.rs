//! crepl REPL: line-oriented front-end for C-family snippets.
//!
//! The front-end reads one line at a time and asks the kernel's validator
//! whether the accumulated input is ready:
//!
//! - **Incomplete** → show a continuation prompt and keep reading
//! - **Complete** → take the submission, lex it strictly for diagnostics,
//!   and hand it to the (stubbed) evaluator
//! - **Invalid** → report the problem and discard the pending input
//!
//! Meta-commands: `/help`, `/quit`, `/show`, `/reset`.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crepl_kernel::lexer;
use crepl_kernel::validator::{InputValidator, ValidationState};

/// REPL state: the validator session plus display settings.
pub struct Repl {
    validator: InputValidator,
}

impl Repl {
    /// Create a new REPL instance with a fresh validator session.
    pub fn new() -> Self {
        Self {
            validator: InputValidator::new(),
        }
    }

    /// Whether input is mid-accumulation (controls the continuation prompt).
    pub fn awaiting_more(&self) -> bool {
        !self.validator.pending().is_empty()
            && self.validator.last_state() == ValidationState::Incomplete
    }

    /// Process a single line of input, returning displayable output.
    ///
    /// `None` means the REPL wants another line (or had nothing to say).
    pub fn feed(&mut self, line: &str) -> Result<Option<String>> {
        // Meta-commands only apply when no submission is pending, so that
        // a line like "/help" inside a string literal is not intercepted.
        if !self.awaiting_more() && line.trim().starts_with('/') {
            return self.handle_meta_command(line.trim());
        }

        match self.validator.validate(line) {
            ValidationState::Incomplete => Ok(None),
            ValidationState::Invalid => {
                let discarded = self.validator.pending().to_string();
                self.validator.reset(None);
                tracing::debug!(?discarded, "discarded invalid input");
                Ok(Some("syntax error: unbalanced input discarded".to_string()))
            }
            ValidationState::Complete => {
                let mut submission = String::new();
                self.validator.reset(Some(&mut submission));
                if submission.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(self.submit(&submission)))
            }
            // Reserved state; nothing produces it today.
            ValidationState::Unknown => Ok(None),
        }
    }

    /// Hand a completed submission to the evaluator.
    ///
    /// The real evaluation pipeline is not wired up yet; a strict lex pass
    /// catches problems the completeness scan tolerates, then the submission
    /// is echoed.
    fn submit(&self, code: &str) -> String {
        match lexer::tokenize(code) {
            Ok(tokens) => format!("[stub] accepted {} token(s): {}", tokens.len(), code),
            Err(e) => format!("lexical error: {e}"),
        }
    }

    /// Handle a meta-command (starts with /).
    fn handle_meta_command(&mut self, cmd: &str) -> Result<Option<String>> {
        let command = cmd.split_whitespace().next().unwrap_or("");

        match command {
            "/quit" | "/q" | "/exit" => {
                std::process::exit(0);
            }
            "/help" | "/h" | "/?" => Ok(Some(HELP_TEXT.to_string())),
            "/show" => {
                if self.validator.pending().is_empty() {
                    Ok(Some("(no pending input)".to_string()))
                } else {
                    Ok(Some(self.validator.pending().to_string()))
                }
            }
            "/reset" => {
                self.validator.reset(None);
                Ok(Some("session reset".to_string()))
            }
            _ => Ok(Some(format!(
                "Unknown command: {command}\nType /help for available commands."
            ))),
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

const HELP_TEXT: &str = r#"crepl, interactive C-family snippets

Commands:
  /help, /h, /?     Show this help
  /quit, /q, /exit  Exit the REPL
  /show             Show the pending (unsubmitted) input
  /reset            Discard pending input and nesting state

Input handling:
  Unbalanced brackets or an open #if keep the prompt in
  continuation mode; a trailing comma does the same. A closer
  with no matching opener discards the pending input.
"#;

/// History file location under the XDG data dir.
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "", "crepl")
        .map(|dirs| dirs.data_dir().join("history.txt"))
}

/// Run the REPL.
pub fn run() -> Result<()> {
    println!("crepl v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.\n");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    let history_path = history_path();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    let mut repl = Repl::new();

    loop {
        let prompt = if repl.awaiting_more() { "...> " } else { "c++> " };

        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                match repl.feed(&line) {
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // ^C abandons whatever was being accumulated.
                repl.validator.reset(None);
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}
