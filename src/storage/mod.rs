//! Durable key-value slots backing the settings record.
//!
//! Every backend stores opaque text values under string keys; the settings
//! repository owns exactly one key.

mod file;
mod memory;
mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

use crate::app_dirs;
use crate::config::{EditorConfig, StorageBackend};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Filename for the SQLite store under the app root.
pub const STORE_DB_FILE_NAME: &str = "settings.db";

/// Errors returned by key-value backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No suitable application directory was available.
    #[error("No suitable config directory available for the settings store")]
    NoStoreDir,
    /// Failed to create the directory holding the store.
    #[error("Could not create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// SQLite query or connection failure.
    #[error("Settings database query failed: {0}")]
    Sql(#[from] rusqlite::Error),
    /// Failed to read a stored value.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a stored value.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Key cannot be mapped onto the backend.
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
    /// Backend refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A durable string-keyed slot store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Open the backend selected by `config` under the app root.
pub fn open_store(config: &EditorConfig) -> Result<Box<dyn KeyValueStore>, StoreError> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let root = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
            Ok(Box::new(SqliteStore::open(&root.join(STORE_DB_FILE_NAME))?))
        }
        StorageBackend::File => {
            let dir = app_dirs::store_dir().map_err(map_app_dir_error)?;
            Ok(Box::new(FileStore::open(dir)?))
        }
    }
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> StoreError {
    match error {
        app_dirs::AppDirError::NoBaseDir => StoreError::NoStoreDir,
        app_dirs::AppDirError::CreateDir { path, source } => StoreError::CreateDir { path, source },
    }
}
