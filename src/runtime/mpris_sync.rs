use std::path::PathBuf;

use crate::controller::PlayerState;
use crate::engine::PlaybackState;
use crate::mpris::MprisHandle;
use crate::track::Track;

/// What MPRIS last saw, to skip redundant updates.
#[derive(Debug, Clone, PartialEq)]
pub struct MprisSnapshot {
    title: String,
    path: Option<PathBuf>,
    playback: PlaybackState,
    volume: u8,
}

impl MprisSnapshot {
    pub fn of(state: &PlayerState) -> Self {
        Self {
            title: state.labels.title.clone(),
            path: presented_track(state).map(|t| t.path.clone()),
            playback: presented_playback(state),
            volume: state.volume.slider(),
        }
    }
}

/// With no track on screen the player reads as stopped, whatever the engine says.
fn presented_playback(state: &PlayerState) -> PlaybackState {
    if state.has_track_displayed() {
        state.playback
    } else {
        PlaybackState::Idle
    }
}

fn presented_track(state: &PlayerState) -> Option<&Track> {
    state.track.as_ref().filter(|_| state.has_track_displayed())
}

pub fn update_mpris(mpris: &MprisHandle, state: &PlayerState) {
    mpris.set_track_metadata(presented_track(state));
    mpris.set_playback(presented_playback(state));
    mpris.set_volume(state.volume.normalized());
}
