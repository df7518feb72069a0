use std::io;
use thiserror::Error;

use crate::settings::SettingsError;
use crate::slice::SliceError;

/// Errors that stop a run. Per-layer and per-piece problems are collected
/// in the slicing and alignment results instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Slice(#[from] SliceError),
    #[error("usage: {0}")]
    Usage(String),
}
