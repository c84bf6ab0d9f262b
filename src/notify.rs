//! User facing progress messages. Informational lines respect `--quiet`,
//! warnings always go to stderr.

use std::fmt::Display;

use colored::Colorize;

#[derive(Debug, Clone, Copy, Default)]
pub struct Notify {
    quiet: bool,
}

impl Notify {
    pub fn new(quiet: bool) -> Self {
        Notify { quiet }
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            println!("{} {message}", "info:".blue().bold());
        }
    }

    pub fn done(&self, message: impl Display) {
        if !self.quiet {
            println!("{} {message}", "done:".green().bold());
        }
    }

    pub fn help(&self, message: impl Display) {
        if !self.quiet {
            println!("{} {message}", "help:".cyan().bold());
        }
    }

    pub fn warn(&self, message: impl Display) {
        eprintln!("{} {message}", "warn:".yellow().bold());
    }
}
