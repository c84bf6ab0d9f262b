//! The `Workdir` is where `gss` keeps its store and generated keys, together
//! with the location of the SSH client config it manages.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::STORE_FILE_NAME;
use crate::{Error, Result};

/// Directory under the home directory holding the store and generated keys
pub const GSS_HOME_DIR: &str = ".gss";

/// SSH client config managed by default
pub const SSH_CONFIG_PATH: [&str; 2] = [".ssh", "config"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workdir {
    root: PathBuf,
    ssh_config: PathBuf,
}

impl Workdir {
    pub fn new(root: impl Into<PathBuf>, ssh_config: impl Into<PathBuf>) -> Self {
        Workdir {
            root: root.into(),
            ssh_config: ssh_config.into(),
        }
    }

    /// Resolves `~/.gss` and `~/.ssh/config`, each replaced by its override
    /// when given. Relative overrides are made absolute.
    pub fn resolve(root: Option<PathBuf>, ssh_config: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => std::path::absolute(root)?,
            None => home_dir()?.join(GSS_HOME_DIR),
        };
        let ssh_config = match ssh_config {
            Some(path) => std::path::absolute(path)?,
            None => SSH_CONFIG_PATH
                .iter()
                .fold(home_dir()?, |path, part| path.join(part)),
        };
        Ok(Self::new(root, ssh_config))
    }

    /// Creates the store directory if needed.
    pub fn ensure(&self) -> Result<()> {
        create_private_dir(&self.root).map_err(|e| {
            Error::io(
                format!("Failed to create config directory {}", self.root.display()),
                e,
            )
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILE_NAME)
    }

    pub fn ssh_config_path(&self) -> &Path {
        &self.ssh_config
    }
}

/// Wrapper on `dirs::home_dir` returning [`Error::HomeNotFound`] instead of
/// `None`.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeNotFound)
}

/// Creates `dir` and its parents, owner-only on Unix.
pub(crate) fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
    }
    #[cfg(not(unix))]
    {
        fs::create_dir_all(dir)
    }
}

/// Replaces the content of `path`, creating it owner-only on Unix.
pub(crate) fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?.write_all(contents)
}
