//! Error types for the virtual pad.

use thiserror::Error;

/// Errors from a [`LayoutStore`](crate::store::LayoutStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its accepted range
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure of a single haptic pulse. Never fatal to input processing.
#[derive(Error, Debug)]
pub enum HapticError {
    #[error("haptic device unavailable")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no multitouch screen found")]
    NoTouchscreen,

    #[error("device does not report axis {0}")]
    MissingAxis(&'static str),
}

#[derive(Error, Debug)]
pub enum PadError {
    #[error("failed to spawn vibration worker: {0}")]
    Spawn(std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type PadResult<T> = Result<T, PadError>;
