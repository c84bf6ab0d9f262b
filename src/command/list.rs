//! List Command
//!
//! Prints every key pair with its index, the index `switch` and `delete`
//! expect.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use comfy_table::{Row, Table};

use git_ssh_switch::keys::summarize_public_key;
use git_ssh_switch::{Identity, ListEntry};

use super::Session;

#[derive(Debug, Parser)]
pub struct ListOpt;

impl ListOpt {
    pub fn process(&self, session: &Session) -> Result<()> {
        let entries = session.store.list();

        if entries.is_empty() {
            session
                .notify
                .warn("No key pairs found. Generate or import one first.");
            session.notify.help(format!(
                "Create one with {} or {}",
                "gss generate -g <name>".bold(),
                "gss import".bold()
            ));
            return Ok(());
        }

        println!("{}", render_table(&entries));
        Ok(())
    }
}

fn render_table(entries: &[ListEntry<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(Row::from([
        " ",
        "INDEX",
        "NAME",
        "KEY",
        "PRIVATE KEY",
        "PUBLIC KEY",
        "SSH CONFIG",
        "GIT CONFIG",
    ]));

    for entry in entries {
        let identity = entry.identity;
        table.add_row(Row::from([
            if entry.active { "✓" } else { " " }.to_string(),
            entry.index.to_string(),
            identity.name.clone(),
            key_cell(identity),
            identity.private_key_path.display().to_string(),
            identity.public_key_path.display().to_string(),
            identity
                .fragment()
                .map_or("N/A".to_string(), |p| p.display().to_string()),
            git_cell(identity),
        ]));
    }

    table.load_preset(comfy_table::presets::NOTHING);
    table
}

// Public keys that are missing or unreadable are shown as unknown, the list
// must still render.
fn key_cell(identity: &Identity) -> String {
    match summarize_public_key(&identity.public_key_path) {
        Ok(summary) => summary.to_string(),
        Err(e) => {
            tracing::debug!(path = ?identity.public_key_path, "Cannot read public key: {e}");
            "unknown".to_string()
        }
    }
}

fn git_cell(identity: &Identity) -> String {
    identity
        .git_settings
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
