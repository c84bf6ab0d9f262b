//! Switch Command
//!
//! Makes a key pair the active one: rewrites the managed SSH config and
//! applies the key pair's git settings.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;

use git_ssh_switch::switch::{choose_index, switch_identity};
use git_ssh_switch::{GitCommand, GitScope, Prompt};

use super::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// `git config --global`
    #[default]
    Global,
    /// The repository in the current directory
    Local,
}

impl From<Scope> for GitScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Global => GitScope::Global,
            Scope::Local => GitScope::local(),
        }
    }
}

#[derive(Debug, Parser)]
pub struct SwitchOpt {
    /// Index of the key pair to switch to, as shown by `gss list`. Prompts
    /// when omitted.
    #[arg(short, long)]
    index: Option<usize>,
    /// Git configuration scope to write to
    #[arg(short, long, value_enum, default_value_t = Scope::Global)]
    scope: Scope,
}

impl SwitchOpt {
    pub fn process(&self, session: &mut Session, prompt: &mut dyn Prompt) -> Result<()> {
        let Some(index) = choose_index(
            &session.store,
            self.index,
            prompt,
            "Select the key pair to switch to",
        )?
        else {
            session.notify.warn("Switch cancelled.");
            return Ok(());
        };

        let scope = GitScope::from(self.scope);
        if let GitScope::File(path) = &scope {
            if !path.exists() {
                session.notify.warn(format!(
                    "Local Git config not found at {}. Ensure you are in a Git repository if using local scope.",
                    path.display()
                ));
            }
        }

        let ssh_config = session.workdir.ssh_config_path().to_path_buf();
        let report = switch_identity(
            &mut session.store,
            index,
            &ssh_config,
            &scope,
            &mut GitCommand::default(),
        )?;

        session.notify.info(format!(
            "Using IdentityFile: {}",
            report.identity.private_key_path.display()
        ));
        for outcome in &report.git {
            match &outcome.result {
                Ok(()) => session.notify.info(format!(
                    "Git config '{}' set to '{}' in {} scope.",
                    outcome.key, outcome.value, report.scope
                )),
                Err(e) => session.notify.warn(e),
            }
        }

        let failed = report.failures().count();
        if failed > 0 {
            session.notify.warn(format!(
                "{failed} git setting(s) could not be applied in {} scope.",
                report.scope
            ));
        }
        session.notify.done(format!(
            "Switched to key pair: {} (Index: {}).",
            report.identity.name.bold(),
            report.index
        ));
        session.save()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use git_ssh_switch::{Error, IdentityStore};

    use super::*;
    use crate::command::testutil::{ScriptedPrompt, TestHome};

    #[test]
    fn defaults_to_global_scope_and_prompt() {
        let opt = SwitchOpt::try_parse_from(["switch"]).unwrap();
        assert_eq!(None, opt.index);
        assert_eq!(Scope::Global, opt.scope);
    }

    #[test]
    fn parses_local_scope() {
        let opt = SwitchOpt::try_parse_from(["switch", "-i", "2", "--scope", "local"]).unwrap();
        assert_eq!(Some(2), opt.index);
        assert_eq!(GitScope::local(), GitScope::from(opt.scope));
    }

    #[test]
    fn failed_switch_is_not_saved() {
        // given
        let home = TestHome::with_identities(&["a", "b"]);
        let mut session = home.session();
        session.store.switch_to(0).unwrap();
        session.save().unwrap();
        let before = home.saved_store();
        fs::remove_file(home.dir.path().join("b")).unwrap();
        let opt = SwitchOpt {
            index: Some(1),
            scope: Scope::Global,
        };

        // when
        let err = opt
            .process(&mut session, &mut ScriptedPrompt::new(None, false))
            .unwrap_err();

        // then
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::KeyNotFound(_))
        ));
        assert_eq!(Some(0), session.store.active_index());
        assert_eq!(before, home.saved_store());
        let saved = IdentityStore::load(&home.workdir().store_path()).unwrap();
        assert_eq!(Some(0), saved.active_index());
        assert!(!home.workdir().ssh_config_path().exists());
    }

    #[test]
    fn out_of_range_index_keeps_saved_store() {
        let home = TestHome::with_identities(&["a", "b"]);
        let before = home.saved_store();
        let mut session = home.session();
        let opt = SwitchOpt {
            index: Some(9),
            scope: Scope::Global,
        };

        let err = opt
            .process(&mut session, &mut ScriptedPrompt::new(None, false))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::IndexOutOfRange { index: 9, len: 2 })
        ));
        assert_eq!(before, home.saved_store());
        assert!(!home.workdir().ssh_config_path().exists());
    }

    #[test]
    fn cancelled_selection_keeps_saved_store() {
        let home = TestHome::with_identities(&["a"]);
        let before = home.saved_store();
        let mut session = home.session();
        let opt = SwitchOpt {
            index: None,
            scope: Scope::Global,
        };

        opt.process(&mut session, &mut ScriptedPrompt::new(None, false))
            .unwrap();

        assert_eq!(None, session.store.active_index());
        assert_eq!(before, home.saved_store());
    }
}
