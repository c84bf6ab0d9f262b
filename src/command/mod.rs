//! `gss` subcommands

pub mod delete;
pub mod generate;
pub mod import;
pub mod list;
pub mod switch;

#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::Parser;

use git_ssh_switch::{IdentityStore, Prompt, Workdir};

use crate::notify::Notify;
use crate::GlobalOptions;

use self::delete::DeleteOpt;
use self::generate::GenerateOpt;
use self::import::ImportOpt;
use self::list::ListOpt;
use self::switch::SwitchOpt;

#[derive(Debug, Parser)]
pub enum Command {
    /// Generate a new SSH key pair
    #[command(name = "generate", visible_alias = "gen")]
    Generate(GenerateOpt),
    /// Import an existing SSH key pair
    #[command(name = "import", visible_alias = "i")]
    Import(ImportOpt),
    /// List all SSH key pairs
    #[command(name = "list", visible_alias = "ls")]
    List(ListOpt),
    /// Switch to an SSH key pair by index, or choose interactively
    #[command(name = "switch", visible_alias = "s")]
    Switch(SwitchOpt),
    /// Delete an SSH key pair entry by index, or choose interactively. Key
    /// files are kept.
    #[command(name = "delete", visible_alias = "del")]
    Delete(DeleteOpt),
}

impl Command {
    pub fn process(
        &self,
        global_opts: &GlobalOptions,
        notify: Notify,
        prompt: &mut dyn Prompt,
    ) -> Result<()> {
        let mut session = Session::open(global_opts, notify)?;

        match self {
            Command::Generate(cmd) => cmd.process(&mut session),
            Command::Import(cmd) => cmd.process(&mut session),
            Command::List(cmd) => cmd.process(&session),
            Command::Switch(cmd) => cmd.process(&mut session, prompt),
            Command::Delete(cmd) => cmd.process(&mut session, prompt),
        }
    }
}

/// The loaded store plus where it lives. Commands that change the store call
/// [`Session::save`] once they are done.
pub struct Session {
    pub workdir: Workdir,
    pub store: IdentityStore,
    pub notify: Notify,
}

impl Session {
    fn open(global_opts: &GlobalOptions, notify: Notify) -> Result<Self> {
        let workdir = Workdir::resolve(
            global_opts.home.clone(),
            global_opts.ssh_config_file.clone(),
        )?;
        workdir.ensure()?;
        let store = IdentityStore::load(&workdir.store_path())?;

        Ok(Session {
            workdir,
            store,
            notify,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.workdir.store_path())?;
        Ok(())
    }
}
