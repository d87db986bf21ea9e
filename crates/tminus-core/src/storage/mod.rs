mod config;
pub mod database;

pub use config::{Config, DisplayConfig, OracleConfig, UploadConfig};
pub use database::{Database, KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `TMINUS_DATA_DIR` overrides everything. Otherwise `~/.config/tminus`, or
/// `~/.config/tminus-dev` when `TMINUS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("TMINUS_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TMINUS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("tminus-dev")
            } else {
                base_dir.join("tminus")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
