//! Line-oriented prompts for the interactive session.

use std::str::FromStr;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Reads answers from the terminal.
///
/// Ctrl-C and Ctrl-D are reported as `None` so the caller can exit cleanly.
pub struct Prompt {
    editor: DefaultEditor,
}

impl Prompt {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Shows `prompt` and returns the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-asks until the answer parses as `T`.
    ///
    /// `invalid` builds the message shown for a rejected answer.
    pub fn choose<T: FromStr>(
        &mut self,
        prompt: &str,
        invalid: impl Fn(&str) -> String,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!(answer = %answer, "Rejected answer");
                    println!("{}", invalid(&answer));
                }
            }
        }
    }

    /// Asks a yes/no question; anything but `yes` counts as no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|a| a.eq_ignore_ascii_case("yes")))
    }
}
