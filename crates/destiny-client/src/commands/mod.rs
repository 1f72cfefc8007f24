//! CLI command handlers.
//!
//! Each sub-module groups related commands by domain. Handlers print to
//! stdout (text, or JSON with `--json`); diagnostics go through `tracing`
//! to stderr.

pub mod catalog;
pub mod device;
pub mod record;

use std::path::Path;

use destiny_store::{Database, StoreError};

use crate::config::ClientConfig;

/// Open the configured database, or the platform default.
pub fn open_database(config: &ClientConfig) -> Result<Database, StoreError> {
    match config.db_path.as_deref() {
        Some(path) => open_at(path),
        None => Database::new(),
    }
}

fn open_at(path: &Path) -> Result<Database, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!(path = %path.display(), "opening database");
    Database::open_at(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            db_path: Some(dir.path().join("nested/deeper/destiny.db")),
            ..ClientConfig::default()
        };
        let db = open_database(&config).unwrap();
        assert!(db.path().unwrap().exists());
    }
}
