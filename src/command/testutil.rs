//! A throwaway `gss` home for running commands end to end.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use git_ssh_switch::{GitSettings, IdentityStore, Prompt, Result, Workdir};

use super::Session;
use crate::notify::Notify;

pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Temp directory holding a saved store plus the SSH config it manages.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    /// Saves one identity per name, each with its own copy of the fixture
    /// private key.
    pub fn with_identities(names: &[&str]) -> Self {
        let home = TestHome {
            dir: TempDir::new().expect("failed to create temp dir"),
        };
        let mut session = home.session();
        for name in names {
            let private = home.dir.path().join(name);
            fs::copy(data_path("id_ed25519"), &private).unwrap();
            session
                .store
                .add_imported(
                    private,
                    data_path("id_ed25519.pub"),
                    name,
                    None,
                    GitSettings::new(),
                )
                .unwrap();
        }
        session.save().unwrap();
        home
    }

    pub fn workdir(&self) -> Workdir {
        Workdir::new(
            self.dir.path().join("gss"),
            self.dir.path().join("ssh").join("config"),
        )
    }

    /// Loads the saved store the same way a fresh `gss` invocation does.
    pub fn session(&self) -> Session {
        let workdir = self.workdir();
        workdir.ensure().unwrap();
        let store = IdentityStore::load(&workdir.store_path()).unwrap();
        Session {
            workdir,
            store,
            notify: Notify::new(true),
        }
    }

    pub fn saved_store(&self) -> Vec<u8> {
        fs::read(self.workdir().store_path()).unwrap()
    }
}

/// Gives a fixed selection and a fixed confirmation answer.
pub struct ScriptedPrompt {
    selection: Option<usize>,
    answer: bool,
    pub confirmations: usize,
}

impl ScriptedPrompt {
    pub fn new(selection: Option<usize>, answer: bool) -> Self {
        ScriptedPrompt {
            selection,
            answer,
            confirmations: 0,
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn select_index(&mut self, _prompt: &str, _candidates: &[String]) -> Result<Option<usize>> {
        Ok(self.selection)
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        self.confirmations += 1;
        Ok(self.answer)
    }
}
