use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::Identity;

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// An identity pointing at the ed25519 fixture key pair.
pub fn fixture_identity(name: &str) -> Identity {
    Identity::new(name, data_path("id_ed25519"), data_path("id_ed25519.pub"))
}
