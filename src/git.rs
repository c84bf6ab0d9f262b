//! Writing identity settings into a Git configuration scope.

use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::identity::GitSettings;
use crate::{Error, Identity, Result};

/// Git key pointed at the managed SSH config on every switch
pub const SSH_COMMAND_KEY: &str = "core.sshCommand";

/// Where settings are written: `git config --global` or `git config --file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitScope {
    Global,
    File(PathBuf),
}

impl GitScope {
    /// The config of the repository in the current directory.
    pub fn local() -> Self {
        GitScope::File(Path::new(".git").join("config"))
    }

    fn args(&self) -> Vec<OsString> {
        match self {
            GitScope::Global => vec!["--global".into()],
            GitScope::File(path) => vec!["--file".into(), path.into()],
        }
    }
}

impl Display for GitScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GitScope::Global => f.write_str("global"),
            GitScope::File(path) => write!(f, "local ({})", path.display()),
        }
    }
}

/// Sets one key in a Git configuration scope.
pub trait GitConfigWriter {
    fn set(&mut self, scope: &GitScope, key: &str, value: &str) -> Result<()>;
}

/// Runs `git config [--global|--file <path>] <key> <value>` for each setting.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: OsString,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::with_program("git")
    }
}

impl GitCommand {
    pub fn with_program(program: impl Into<OsString>) -> Self {
        GitCommand {
            program: program.into(),
        }
    }

    fn command(&self, scope: &GitScope, key: &str, value: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("config").args(scope.args()).arg(key).arg(value);
        command
    }
}

impl GitConfigWriter for GitCommand {
    fn set(&mut self, scope: &GitScope, key: &str, value: &str) -> Result<()> {
        let mut command = self.command(scope, key, value);
        tracing::debug!(?command, "Running git config");

        let failed = |reason: String| Error::GitConfigApplyFailed {
            key: key.to_string(),
            reason,
        };
        let output = command
            .output()
            .map_err(|e| failed(format!("could not run {:?}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match (output.status.code(), stderr.trim()) {
                (Some(code), "") => format!("git exited with code {code}"),
                (Some(code), stderr) => format!("git exited with code {code}: {stderr}"),
                (None, _) => "git was terminated".to_string(),
            };
            return Err(failed(reason));
        }
        Ok(())
    }
}

/// Value of `core.sshCommand` that makes git use the managed SSH config.
/// Separators are normalized to `/` so the command also works on Windows.
pub fn ssh_command(ssh_config: &Path) -> String {
    format!("ssh -F {}", ssh_config.display().to_string().replace('\\', "/"))
}

/// The settings applied when switching to `identity`: its own settings with
/// `core.sshCommand` set, overriding any value it carried.
pub fn settings_for_switch(identity: &Identity, ssh_config: &Path) -> GitSettings {
    let mut settings = identity.git_settings.clone();
    settings.insert(SSH_COMMAND_KEY.to_string(), ssh_command(ssh_config));
    settings
}
