use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The persisted store exists but could not be parsed.
    #[error("Config file {path} is corrupt: {reason}")]
    ConfigCorrupt { path: PathBuf, reason: String },
    /// A key file referenced by an identity does not exist.
    #[error("Key not found: {0}")]
    KeyNotFound(PathBuf),
    /// The private key is not in an encoding we recognise.
    #[error("Unsupported private key format: {0}")]
    UnsupportedKeyFormat(PathBuf),
    #[error("Failed to generate key pair: {0}")]
    KeyGenerationFailed(String),
    #[error("No key pairs found. Generate or import one first.")]
    NoIdentities,
    #[error("Invalid index: {index} (available: {})", available(.len))]
    IndexOutOfRange { index: usize, len: usize },
    /// A single git setting could not be applied. Reported per key, never
    /// aborts the remaining settings.
    #[error("Failed to set git config '{key}': {reason}")]
    GitConfigApplyFailed { key: String, reason: String },
    #[error("SSH config fragment not found: {0}")]
    FragmentNotFound(PathBuf),
    #[error("Invalid git setting '{0}', expected key=value")]
    InvalidGitSetting(String),
    /// Key pair names become file names inside the store directory.
    #[error("Invalid key pair name '{0}': must be a plain file name without path separators")]
    InvalidKeyName(String),
    #[error("Failed to resolve home directory")]
    HomeNotFound,
    #[error("{}", io_message(.0, .1))]
    IO(Option<String>, #[source] std::io::Error),
    #[error("SSH key error: {0}")]
    SshKey(#[from] ssh_key::Error),
}

fn available(len: &usize) -> String {
    match *len {
        0 => "none".to_string(),
        len => format!("0 to {}", len - 1),
    }
}

fn io_message(context: &Option<String>, e: &std::io::Error) -> String {
    match context {
        Some(context) => format!("{context}: {e}"),
        None => format!("I/O error: {e}"),
    }
}

impl Error {
    /// Wraps an I/O error with a message naming what was being done.
    pub fn io(context: impl Into<String>, e: std::io::Error) -> Self {
        Error::IO(Some(context.into()), e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(None, e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
