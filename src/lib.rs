//! Keeps a list of SSH key pair identities and switches the active one by
//! rewriting a managed SSH client config and the matching Git settings.
//!
//! The [`IdentityStore`] owns the identities and the active index. The
//! [`switch`] module applies a transition to the SSH config and to Git
//! through a [`GitConfigWriter`].

mod error;
#[cfg(test)]
mod testutil;
pub mod bits;
pub mod git;
pub mod identity;
pub mod keys;
pub mod prompt;
pub mod ssh_config;
pub mod store;
pub mod switch;
pub mod workdir;

pub use self::error::Error;
pub use self::error::Result;
pub use self::git::{GitCommand, GitConfigWriter, GitScope};
pub use self::identity::{GitSettings, Identity};
pub use self::keys::{KeyAlgorithm, KeyFormat};
pub use self::prompt::{Prompt, TerminalPrompt};
pub use self::store::{IdentityStore, ListEntry};
pub use self::workdir::Workdir;
