//! Settings state engine: record model, validation, debounced persistence.
/// Application directory helpers.
pub mod app_dirs;
mod atomic_file;
/// Debounced autosave scheduling.
pub mod autosave;
/// Editor configuration file.
pub mod config;
/// Controller bridging the record to the presentation layer.
pub mod controller;
/// Tracing setup.
pub mod logging;
/// Load/save of the settings record.
pub mod persistence;
/// Settings record model.
pub mod settings;
/// Durable key-value backends.
pub mod storage;
/// Email validation.
pub mod validation;

pub use controller::{SaveStatus, SettingsController};
pub use settings::{RawFieldValues, Settings, Theme};
pub use validation::{ValidationVerdict, validate_email};
