//! The persisted list of identities and the pointer to the active one.
//!
//! On disk the store is a JSON object:
//!
//! ```json
//! {
//!   "keys": [ { "name": "...", "private_key_path": "...", ... } ],
//!   "active_key": -1
//! }
//! ```
//!
//! `active_key` is `-1` when no identity is active. Fields this version does
//! not know about are carried through load and save untouched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::identity::{GitSettings, Identity};
use crate::keys::{generate_key_pair, validate_private_key, KeyAlgorithm};
use crate::workdir::write_private_file;
use crate::{Error, Result};

pub const STORE_FILE_NAME: &str = "config.json";

const UNSET: i64 = -1;

#[derive(Serialize, Deserialize)]
struct StoreFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    keys: Vec<Identity>,
    #[serde(default = "unset")]
    active_key: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn unset() -> i64 {
    UNSET
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Identity>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of [`IdentityStore::list`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListEntry<'a> {
    pub index: usize,
    pub identity: &'a Identity,
    pub active: bool,
}

/// Owns the identities and is the only place the active index changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityStore {
    identities: Vec<Identity>,
    active: Option<usize>,
    extra: Map<String, Value>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the store at `path`. A missing file yields an empty store, a
    /// file that does not parse is [`Error::ConfigCorrupt`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "No store file yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(Error::io(format!("Failed to read {}", path.display()), e));
            }
        };

        let file: StoreFile =
            serde_json::from_str(&contents).map_err(|e| Error::ConfigCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let active = match usize::try_from(file.active_key) {
            Ok(index) if index < file.keys.len() => Some(index),
            _ if file.active_key == UNSET => None,
            _ => {
                warn!(
                    active_key = file.active_key,
                    len = file.keys.len(),
                    "Active key index out of range, treating as unset"
                );
                None
            }
        };

        debug!(?path, len = file.keys.len(), ?active, "Loaded identity store");
        Ok(IdentityStore {
            identities: file.keys,
            active,
            extra: file.extra,
        })
    }

    /// Writes the whole store to `path` as indented JSON, readable only by
    /// the owner.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = StoreFile {
            keys: self.identities.clone(),
            active_key: self.active.map_or(UNSET, |i| i as i64),
            extra: self.extra.clone(),
        };
        let mut json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::io("Failed to serialize store", e.into()))?;
        json.push('\n');

        write_private_file(path, json.as_bytes())
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
        debug!(?path, len = self.identities.len(), "Saved identity store");
        Ok(())
    }

    /// Generates a new key pair in `dir`, named after `name` with a numeric
    /// suffix on collision, and appends an identity for it. The key comment
    /// defaults to `name`. Nothing is appended if generation fails.
    pub fn add_generated(
        &mut self,
        dir: &Path,
        name: &str,
        algorithm: KeyAlgorithm,
        comment: Option<&str>,
    ) -> Result<&Identity> {
        let comment = comment.unwrap_or(name);
        let (private_key_path, public_key_path) =
            generate_key_pair(dir, name, algorithm, comment)?;
        info!(name, ?private_key_path, "Generated identity");
        Ok(self.push(Identity::new(name, private_key_path, public_key_path)))
    }

    /// Appends an identity for an existing key pair. The paths are stored as
    /// given; key files are referenced in place, never copied.
    pub fn add_imported(
        &mut self,
        private_key_path: PathBuf,
        public_key_path: PathBuf,
        name: &str,
        fragment: Option<PathBuf>,
        git_settings: GitSettings,
    ) -> Result<&Identity> {
        if !private_key_path.exists() {
            return Err(Error::KeyNotFound(private_key_path));
        }
        if !public_key_path.exists() {
            return Err(Error::KeyNotFound(public_key_path));
        }
        let format = validate_private_key(&private_key_path)?;
        if let Some(fragment) = &fragment {
            if !fragment.exists() {
                return Err(Error::FragmentNotFound(fragment.clone()));
            }
        }

        info!(name, ?private_key_path, %format, "Imported identity");
        let identity = Identity::new(name, private_key_path, public_key_path)
            .with_fragment(fragment)
            .with_git_settings(git_settings);
        Ok(self.push(identity))
    }

    fn push(&mut self, identity: Identity) -> &Identity {
        self.identities.push(identity);
        &self.identities[self.identities.len() - 1]
    }

    /// All identities in index order with their active flag.
    pub fn list(&self) -> Vec<ListEntry<'_>> {
        self.identities
            .iter()
            .enumerate()
            .map(|(index, identity)| ListEntry {
                index,
                identity,
                active: self.active == Some(index),
            })
            .collect()
    }

    /// Makes the identity at `index` the active one and returns it. The
    /// store is left untouched when `index` is out of range.
    pub fn switch_to(&mut self, index: usize) -> Result<&Identity> {
        self.check_index(index)?;
        debug!(from = ?self.active, to = index, "Switching active identity");
        self.active = Some(index);
        Ok(&self.identities[index])
    }

    /// Removes the identity at `index` from the store, leaving its key files
    /// on disk. The active index keeps pointing at the same identity, or
    /// falls back to `0` (or unset when empty) if the active one was removed.
    pub fn delete(&mut self, index: usize) -> Result<Identity> {
        self.check_index(index)?;
        let removed = self.identities.remove(index);

        self.active = match self.active {
            Some(active) if active == index => {
                if self.identities.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(active) if active > index => Some(active - 1),
            other => other,
        };

        info!(name = %removed.name, index, active = ?self.active, "Deleted identity");
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.identities.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.identities.len(),
            });
        }
        Ok(())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Identity> {
        self.active.map(|i| &self.identities[i])
    }

    pub fn get(&self, index: usize) -> Option<&Identity> {
        self.identities.get(index)
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
