//! Delete Command
//!
//! Removes a key pair from the list. The key files themselves are never
//! deleted.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use git_ssh_switch::switch::{choose_index, delete_identity};
use git_ssh_switch::{Error, Prompt};

use super::Session;

#[derive(Debug, Parser)]
pub struct DeleteOpt {
    /// Index of the key pair to delete, as shown by `gss list`. Prompts
    /// when omitted.
    #[arg(short, long)]
    index: Option<usize>,
    /// Delete without asking for confirmation
    #[arg(short, long, default_value_t = false)]
    force: bool,
}

impl DeleteOpt {
    pub fn process(&self, session: &mut Session, prompt: &mut dyn Prompt) -> Result<()> {
        let Some(index) = choose_index(
            &session.store,
            self.index,
            prompt,
            "Select the key pair to delete",
        )?
        else {
            session.notify.warn("Deletion cancelled.");
            return Ok(());
        };

        let identity = session.store.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: session.store.len(),
        })?;

        println!("Selected key pair for deletion:");
        println!("  Name: {}", identity.name.bold());
        println!("  Private Key: {}", identity.private_key_path.display());
        println!("  Public Key: {}", identity.public_key_path.display());
        if let Some(fragment) = identity.fragment() {
            println!("  SSH Config: {}", fragment.display());
        }

        if !self.force
            && !prompt.confirm(
                "Delete this key pair entry from config? (Files will not be deleted)",
            )?
        {
            session.notify.warn("Deletion cancelled.");
            return Ok(());
        }

        let ssh_config = session.workdir.ssh_config_path().to_path_buf();
        let report = delete_identity(&mut session.store, index, &ssh_config)?;

        if report.was_active {
            match &report.active {
                Some((active, name)) => {
                    session.notify.info(format!(
                        "Active key was deleted. {name} (Index: {active}) is now the active key pair."
                    ));
                    session.notify.help(format!(
                        "Apply it with {}",
                        format!("gss switch -i {active}").bold()
                    ));
                }
                None => session
                    .notify
                    .info("No key pairs remaining. Active key unset."),
            }
        }
        if report.ssh_config_cleared {
            session
                .notify
                .info(format!("Cleared SSH config {}", ssh_config.display()));
        }
        session.notify.done(format!(
            "Deleted key pair entry: {} (Index: {}) from config",
            report.removed.name.bold(),
            report.index
        ));
        session.save()
    }
}
