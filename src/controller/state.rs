//! The controller's explicit state value.

use crate::engine::PlaybackState;
use crate::track::Track;

/// Volume slider position, `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: u8 = 100;

    /// Slider values above 100 clamp to 100.
    pub fn from_slider(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn slider(self) -> u8 {
        self.0
    }

    /// `slider / 100`, in `0.0..=1.0`.
    pub fn normalized(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Move the slider by `delta`, clamped to `0..=100`.
    pub fn nudged(self, delta: i16) -> Self {
        let v = (i16::from(self.0) + delta).clamp(0, i16::from(Self::MAX));
        Self(v as u8)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// The two text labels of the control surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub elapsed: String,
}

impl Labels {
    pub fn clear(&mut self) {
        self.title.clear();
        self.elapsed.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub track: Option<Track>,
    pub volume: Volume,
    pub labels: Labels,
    /// Last state the engine reported; display only.
    pub playback: PlaybackState,
    /// One-line message for the user, e.g. a failed load.
    pub notice: Option<String>,
}

impl PlayerState {
    /// A track is presented when the title label is non-empty.
    pub fn has_track_displayed(&self) -> bool {
        !self.labels.title.is_empty()
    }
}
