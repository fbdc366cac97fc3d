//! Error taxonomy for the player.
//!
//! Every variant is recoverable while the UI is running; the runtime turns
//! them into a one-line notice instead of tearing the terminal down.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("no file selected")]
    FileSelectionCancelled,

    #[error("unsupported format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to load {}: {reason}", .path.display())]
    SourceLoadFailed { path: PathBuf, reason: String },

    #[error("no track selected")]
    NoTrackSelected,

    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("audio engine stopped responding")]
    EngineGone,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PlayerError {
    pub fn source_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceLoadFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
