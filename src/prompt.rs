//! Interactive input, kept behind a trait so callers can script it.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use crate::{Error, Result};

pub trait Prompt {
    /// Asks for one of `candidates` and returns its position, `None` when
    /// the user backs out.
    fn select_index(&mut self, prompt: &str, candidates: &[String]) -> Result<Option<usize>>;

    /// Asks a yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Prompt for TerminalPrompt {
    fn select_index(&mut self, prompt: &str, candidates: &[String]) -> Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(candidates)
            .default(0)
            .interact_opt()
            .map_err(prompt_failed)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_failed)
    }
}

fn prompt_failed(e: dialoguer::Error) -> Error {
    Error::io("Failed to read from terminal", std::io::Error::other(e))
}
