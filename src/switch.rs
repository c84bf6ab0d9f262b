//! Applying store transitions to the outside world: the managed SSH config
//! and the Git configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::git::{settings_for_switch, GitConfigWriter, GitScope};
use crate::prompt::Prompt;
use crate::store::IdentityStore;
use crate::{ssh_config, Error, Identity, Result};

/// Result of applying one git setting.
#[derive(Debug)]
pub struct GitOutcome {
    pub key: String,
    pub value: String,
    pub result: Result<()>,
}

#[derive(Debug)]
pub struct SwitchReport {
    pub index: usize,
    pub identity: Identity,
    pub ssh_config: PathBuf,
    pub scope: GitScope,
    pub git: Vec<GitOutcome>,
}

impl SwitchReport {
    pub fn failures(&self) -> impl Iterator<Item = &GitOutcome> {
        self.git.iter().filter(|outcome| outcome.result.is_err())
    }
}

#[derive(Debug)]
pub struct DeleteReport {
    pub index: usize,
    pub removed: Identity,
    pub was_active: bool,
    /// Index and name of the active identity after the deletion.
    pub active: Option<(usize, String)>,
    pub ssh_config_cleared: bool,
}

/// Returns `requested` if given, otherwise asks the user to pick one of the
/// identities in `store`.
pub fn choose_index<P: Prompt + ?Sized>(
    store: &IdentityStore,
    requested: Option<usize>,
    prompt: &mut P,
    question: &str,
) -> Result<Option<usize>> {
    if store.is_empty() {
        return Err(Error::NoIdentities);
    }
    if let Some(index) = requested {
        return Ok(Some(index));
    }
    let candidates: Vec<String> = store
        .list()
        .iter()
        .map(|entry| {
            let marker = if entry.active { "*" } else { " " };
            format!(
                "{marker} {}: {} ({})",
                entry.index,
                entry.identity.name,
                entry.identity.private_key_path.display()
            )
        })
        .collect();
    prompt.select_index(question, &candidates)
}

/// Rewrites the SSH config at `ssh_config` for the identity at `index`,
/// marks it active and applies its git settings to `scope`.
///
/// The private key must exist and is restricted to its owner. The active
/// index is left alone if any of that fails. A failing git setting is
/// recorded in the report and does not stop the others.
pub fn switch_identity<G: GitConfigWriter + ?Sized>(
    store: &mut IdentityStore,
    index: usize,
    ssh_config: &Path,
    scope: &GitScope,
    git: &mut G,
) -> Result<SwitchReport> {
    let identity = store
        .get(index)
        .cloned()
        .ok_or(Error::IndexOutOfRange {
            index,
            len: store.len(),
        })?;

    if !identity.private_key_path.exists() {
        return Err(Error::KeyNotFound(identity.private_key_path));
    }
    restrict_private_key(&identity.private_key_path)?;
    ssh_config::write(ssh_config, &identity)?;
    // only mark it active once the SSH config names it
    store.switch_to(index)?;

    let outcomes = settings_for_switch(&identity, ssh_config)
        .into_iter()
        .map(|(key, value)| {
            let result = git.set(scope, &key, &value);
            match &result {
                Ok(()) => info!(%key, %value, %scope, "Applied git setting"),
                Err(e) => warn!(%key, %scope, "{e}"),
            }
            GitOutcome { key, value, result }
        })
        .collect();

    info!(name = %identity.name, index, "Switched identity");
    Ok(SwitchReport {
        index,
        identity,
        ssh_config: ssh_config.to_path_buf(),
        scope: scope.clone(),
        git: outcomes,
    })
}

/// Removes the identity at `index`. When it was the active one and nothing
/// is left, the managed SSH config is emptied. Key files stay on disk.
pub fn delete_identity(
    store: &mut IdentityStore,
    index: usize,
    ssh_config: &Path,
) -> Result<DeleteReport> {
    let was_active = store.active_index() == Some(index);
    let removed = store.delete(index)?;

    let ssh_config_cleared = was_active && store.is_empty();
    if ssh_config_cleared {
        ssh_config::clear(ssh_config)?;
    }

    let active = store
        .active_index()
        .zip(store.active())
        .map(|(i, identity)| (i, identity.name.clone()));

    Ok(DeleteReport {
        index,
        removed,
        was_active,
        active,
        ssh_config_cleared,
    })
}

#[cfg(unix)]
fn restrict_private_key(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
        Error::io(
            format!("Failed to set permissions of {} to 0600", path.display()),
            e,
        )
    })
}

#[cfg(not(unix))]
fn restrict_private_key(_path: &Path) -> Result<()> {
    Ok(())
}
