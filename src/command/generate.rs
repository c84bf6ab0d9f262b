//! Generate Command
//!
//! Creates a new key pair inside the `gss` home directory and appends it to
//! the list.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use git_ssh_switch::KeyAlgorithm;

use super::Session;

#[derive(Debug, Parser)]
pub struct GenerateOpt {
    /// Name of the new key pair, also used for its file names
    #[arg(short = 'g', long = "name")]
    name: String,
    /// Key algorithm: ed25519, ecdsa (P-256) or rsa (4096 bits)
    #[arg(short, long, default_value_t = KeyAlgorithm::Ed25519)]
    algorithm: KeyAlgorithm,
    /// Comment stored in the key [default: the name]
    #[arg(short, long)]
    comment: Option<String>,
}

impl GenerateOpt {
    pub fn process(&self, session: &mut Session) -> Result<()> {
        let dir = session.workdir.root().to_path_buf();
        let identity = session
            .store
            .add_generated(&dir, &self.name, self.algorithm, self.comment.as_deref())?;

        session.notify.done(format!(
            "Generated: {} ({}, {})",
            identity.name.bold(),
            identity.private_key_path.display(),
            identity.public_key_path.display()
        ));
        session.save()
    }
}
