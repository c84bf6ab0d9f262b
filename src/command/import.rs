//! Import Command
//!
//! Registers an existing key pair. The key files are referenced where they
//! are, nothing is copied.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use git_ssh_switch::identity::parse_git_setting;
use git_ssh_switch::GitSettings;

use super::Session;

#[derive(Debug, Parser)]
pub struct ImportOpt {
    /// Private key path
    #[arg(short = 'i', long = "private")]
    private_key: PathBuf,
    /// Public key path
    #[arg(short = 'p', long = "public")]
    public_key: PathBuf,
    /// Name for the imported key pair
    #[arg(short = 'n', long)]
    name: String,
    /// SSH config fragment appended to the managed config while this key
    /// pair is active
    #[arg(short = 'c', long = "ssh-config", value_name = "PATH")]
    fragment: Option<PathBuf>,
    /// Git user email
    #[arg(long)]
    git_email: Option<String>,
    /// Git user name
    #[arg(long)]
    git_name: Option<String>,
    /// Additional git setting as key=value, may be repeated
    #[arg(long = "git", value_name = "KEY=VALUE")]
    git_settings: Vec<String>,
}

impl ImportOpt {
    pub fn process(&self, session: &mut Session) -> Result<()> {
        let private_key = std::path::absolute(&self.private_key)?;
        let public_key = std::path::absolute(&self.public_key)?;
        let fragment = self
            .fragment
            .as_ref()
            .map(std::path::absolute)
            .transpose()?;
        let git_settings = self.git_settings()?;

        let identity = session.store.add_imported(
            private_key,
            public_key,
            &self.name,
            fragment,
            git_settings,
        )?;

        session.notify.done(format!(
            "Imported: {} ({}, {}, {})",
            identity.name.bold(),
            identity.private_key_path.display(),
            identity.public_key_path.display(),
            identity
                .fragment()
                .map_or("N/A".to_string(), |p| p.display().to_string())
        ));
        session.save()
    }

    fn git_settings(&self) -> Result<GitSettings> {
        let mut settings = GitSettings::new();
        for arg in &self.git_settings {
            let (key, value) = parse_git_setting(arg)?;
            settings.insert(key, value);
        }
        if let Some(email) = &self.git_email {
            settings.insert("user.email".to_string(), email.clone());
        }
        if let Some(name) = &self.git_name {
            settings.insert("user.name".to_string(), name.clone());
        }
        Ok(settings)
    }
}
