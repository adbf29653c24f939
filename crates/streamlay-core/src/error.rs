use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create window {0}")]
    WindowCreation(String),
    #[error("Overlay {0} not found")]
    OverlayNotFound(String),
    #[error("Preset name must not be empty")]
    InvalidPresetName,
    #[error("Preset {0} has no overlay URLs")]
    EmptyPreset(String),
    #[error("Preset {0} not found")]
    PresetNotFound(String),
    #[error("Preset {name} is malformed: {reason}")]
    MalformedPreset { name: String, reason: String },
    #[error("Tauri error: {0}")]
    TauriError(#[from] tauri::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
