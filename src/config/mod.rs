//! Editor configuration stored as TOML under the app root.

mod errors;
mod types;

use std::path::{Path, PathBuf};

use crate::app_dirs;
use crate::atomic_file::atomic_write;

pub use errors::ConfigError;
pub use types::{
    AutosaveSettings, EditorConfig, StorageBackend, StorageSettings, ValidationSettings,
};

/// Default filename used to store the editor configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<EditorConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load and normalize the configuration at `path`; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<EditorConfig, ConfigError> {
    if !path.exists() {
        return Ok(EditorConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<EditorConfig>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(EditorConfig::normalized)
}

/// Persist configuration to disk, overwriting any previous contents.
pub fn save(config: &EditorConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
///
/// The file is replaced atomically so an interrupted save keeps the old config.
pub fn save_to_path(config: &EditorConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
