use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;
use crate::hook::event::EventError;
use crate::tracker::client::TrackerError;

/// Top-level error that wraps all module-specific errors
///
/// The gatekeeping path never returns these to the host; each failure there
/// is mapped to a verdict at its boundary. They surface only from maintenance
/// commands such as `policy init`.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Hook input error: {0}")]
    Event(#[from] EventError),

    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application-level operations
pub type HookResult<T> = std::result::Result<T, HookError>;
