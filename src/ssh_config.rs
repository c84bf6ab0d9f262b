//! The managed SSH client config file.
//!
//! The file is regenerated from scratch on every switch, so manual edits do
//! not survive. Its content is one `IdentityFile` line, followed by a newline
//! and the verbatim content of the identity's fragment file when it has one.

use std::fs;
use std::path::Path;

use crate::workdir::{create_private_dir, write_private_file};
use crate::{Error, Identity, Result};

/// Builds the config text for `identity`, reading its fragment if any.
pub fn render(identity: &Identity) -> Result<Vec<u8>> {
    let mut content = format!("IdentityFile {}", identity.private_key_path.display()).into_bytes();

    if let Some(fragment) = identity.fragment() {
        if !fragment.exists() {
            return Err(Error::FragmentNotFound(fragment.to_path_buf()));
        }
        let extra = fs::read(fragment).map_err(|e| {
            Error::io(format!("Failed to read SSH config fragment {}", fragment.display()), e)
        })?;
        content.push(b'\n');
        content.extend_from_slice(&extra);
    }
    Ok(content)
}

/// Overwrites the config at `path` with the rendering of `identity`.
pub fn write(path: &Path, identity: &Identity) -> Result<()> {
    let content = render(identity)?;
    write_config(path, &content)?;
    tracing::debug!(?path, name = %identity.name, "Wrote SSH config");
    Ok(())
}

/// Truncates the config at `path`, used once no identity is left. A config
/// that does not exist yet is left alone.
pub fn clear(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    write_config(path, &[])?;
    tracing::debug!(?path, "Cleared SSH config");
    Ok(())
}

fn write_config(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_private_dir(parent)
            .map_err(|e| Error::io(format!("Failed to create {}", parent.display()), e))?;
    }
    write_private_file(path, content)
        .map_err(|e| Error::io(format!("Failed to update SSH config {}", path.display()), e))
}
