//! A single managed key pair and the Git settings applied with it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Git key/value settings of an identity, applied in key order.
pub type GitSettings = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    /// Extra SSH client directives appended to the managed config while this
    /// identity is active. Persisted as an empty string when absent.
    #[serde(
        rename = "ssh_config",
        default,
        serialize_with = "fragment::serialize",
        deserialize_with = "fragment::deserialize"
    )]
    pub ssh_config_fragment: Option<PathBuf>,
    #[serde(
        rename = "git_config",
        default,
        deserialize_with = "deserialize_git_settings"
    )]
    pub git_settings: GitSettings,
    /// Fields written by other versions of the tool, kept as-is.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        private_key_path: impl Into<PathBuf>,
        public_key_path: impl Into<PathBuf>,
    ) -> Self {
        Identity {
            name: name.into(),
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            ssh_config_fragment: None,
            git_settings: GitSettings::new(),
            extra: Map::new(),
        }
    }

    pub fn with_fragment(mut self, fragment: Option<PathBuf>) -> Self {
        self.ssh_config_fragment = fragment;
        self
    }

    pub fn with_git_settings(mut self, git_settings: GitSettings) -> Self {
        self.git_settings = git_settings;
        self
    }

    pub fn fragment(&self) -> Option<&Path> {
        self.ssh_config_fragment.as_deref()
    }
}

/// Parses a `key=value` argument into a git setting. The key must be
/// non-empty and contain a section separator, the value may be empty.
pub fn parse_git_setting(arg: &str) -> Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| Error::InvalidGitSetting(arg.to_string()))?;
    let key = key.trim();
    if key.is_empty() || !key.contains('.') || key.starts_with('.') || key.ends_with('.') {
        return Err(Error::InvalidGitSetting(arg.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

// Older stores may hold `null` instead of an object. Non-string values are
// rejected rather than skipped so that a reload never silently loses one.
fn deserialize_git_settings<'de, D>(deserializer: D) -> std::result::Result<GitSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    let mut settings = GitSettings::new();
    for (key, value) in raw.unwrap_or_default() {
        match value {
            Value::String(s) => {
                settings.insert(key, s);
            }
            other => {
                return Err(serde::de::Error::custom(format!(
                    "git_config value for '{key}' must be a string, found {other}"
                )))
            }
        }
    }
    Ok(settings)
}

mod fragment {
    use super::*;

    pub fn serialize<S>(fragment: &Option<PathBuf>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match fragment {
            Some(path) => path.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(PathBuf::from))
    }
}
