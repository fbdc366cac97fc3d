//! Engine-side enums, commands and shared handles.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Playback state as owned by the engine.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug)]
pub enum EngineCmd {
    /// Open `path` as the current source; the outcome goes back on `reply`.
    Open {
        path: PathBuf,
        reply: Sender<Result<()>>,
    },
    Play,
    Pause,
    /// Stop and rewind to 0.
    Stop,
    /// Normalized output volume.
    SetVolume(f32),
    /// Quit the engine thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications from the engine thread, delivered in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Elapsed playback position in milliseconds.
    PositionChanged(u64),
    StateChanged(PlaybackState),
    /// Playback could not continue (e.g. the source failed to reopen).
    Failed(String),
}

/// Runtime playback information shared with the UI thread.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub state: PlaybackState,
    pub volume: f32,
    pub source: Option<PathBuf>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            volume: 1.0,
            source: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Clamp a volume to the normalized range; NaN becomes silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
