//! Error types for the oo browser chrome.

use std::io;

/// Errors produced by the chrome and its platform collaborators.
#[derive(Debug, thiserror::Error)]
pub enum OoError {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("content host error: {0}")]
    Content(String),

    #[error("permission error: {0}")]
    Permission(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, OoError>;
