//! Playback controller: turns control-surface intents into engine calls and
//! engine notifications into label text.
//!
//! The controller owns one `PlayerState` and one engine. Selecting a file,
//! loading it and starting playback are separate operations; callers compose
//! them (see `open_and_play`).

mod elapsed;
mod state;

use std::path::PathBuf;

use crate::chooser::{ExtensionFilter, FileChooser};
use crate::config::{ElapsedFormat, Settings};
use crate::engine::{AudioEngine, EngineEvent};
use crate::error::{PlayerError, Result};
use crate::track::Track;

pub use elapsed::format_elapsed;
pub use state::{Labels, PlayerState, Volume};

/// Settings the controller needs, lifted out of `Settings`.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub caption: String,
    pub initial_dir: PathBuf,
    pub filter: ExtensionFilter,
    pub initial_volume: Volume,
    pub volume_step: u8,
    pub elapsed_format: ElapsedFormat,
}

impl From<&Settings> for ControllerOptions {
    fn from(s: &Settings) -> Self {
        Self {
            caption: s.chooser.caption.clone(),
            initial_dir: s.chooser.initial_dir.clone(),
            filter: ExtensionFilter::from_settings(&s.chooser),
            initial_volume: Volume::from_slider(s.audio.initial_volume),
            volume_step: s.audio.volume_step,
            elapsed_format: s.ui.elapsed_format,
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

pub struct Controller<E: AudioEngine> {
    engine: E,
    state: PlayerState,
    options: ControllerOptions,
}

impl<E: AudioEngine> Controller<E> {
    /// The slider starts at the configured initial volume, whether or not a
    /// track ever loads.
    pub fn new(engine: E, options: ControllerOptions) -> Self {
        let state = PlayerState {
            volume: options.initial_volume,
            ..PlayerState::default()
        };
        Self {
            engine,
            state,
            options,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Ask `chooser` for a file and make it the current track.
    ///
    /// Cancelling yields `FileSelectionCancelled` and keeps the previous track.
    pub fn select_track(&mut self, chooser: &mut dyn FileChooser) -> Result<&Track> {
        let picked = chooser.prompt_open_file(
            &self.options.caption,
            &self.options.initial_dir,
            &self.options.filter,
        )?;
        let Some(path) = picked else {
            tracing::info!("file selection cancelled");
            return Err(PlayerError::FileSelectionCancelled);
        };

        let track = Track::from_path(path, &self.options.filter)?;
        tracing::info!(track = %track.display_name, "track selected");
        Ok(self.state.track.insert(track))
    }

    /// Bind the current track as the engine source and push the volume.
    pub fn load(&mut self) -> Result<()> {
        let track = self.state.track.as_ref().ok_or(PlayerError::NoTrackSelected)?;
        self.engine.open(&track.path)?;
        self.state.labels.elapsed.clear();
        self.engine.set_volume(self.state.volume.normalized())
    }

    pub fn play(&mut self) -> Result<()> {
        self.engine.play()
    }

    /// Load the current track, preset the initial volume and start playing.
    pub fn load_and_play(&mut self) -> Result<()> {
        self.load()?;
        self.set_volume(self.options.initial_volume.slider())?;
        self.play()
    }

    pub fn update_title_label(&mut self) {
        self.state.labels.title = self
            .state
            .track
            .as_ref()
            .map(|t| t.display_name.clone())
            .unwrap_or_default();
    }

    /// Select, load, play and show a new track.
    ///
    /// If the new track fails to load, the previous one stays current so the
    /// title, `reload` and MPRIS keep describing what the engine still plays.
    pub fn open_and_play(&mut self, chooser: &mut dyn FileChooser) -> Result<()> {
        let previous = self.state.track.clone();
        self.select_track(chooser)?;
        if let Err(e) = self.load_and_play() {
            self.state.track = previous;
            return Err(e);
        }
        self.update_title_label();
        self.state.notice = None;
        Ok(())
    }

    /// Replay the kept track after a stop.
    pub fn reload(&mut self) -> Result<()> {
        self.load_and_play()?;
        self.update_title_label();
        self.state.notice = None;
        Ok(())
    }

    /// Refresh the elapsed label from an engine position report.
    ///
    /// Ignored while no track is displayed, so a report already in flight
    /// when `stop` ran cannot repopulate the cleared label.
    pub fn on_position_changed(&mut self, elapsed_ms: u64) {
        if !self.state.has_track_displayed() {
            return;
        }
        self.state.labels.elapsed = format_elapsed(elapsed_ms, self.options.elapsed_format);
    }

    pub fn on_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PositionChanged(ms) => self.on_position_changed(ms),
            EngineEvent::StateChanged(s) => self.state.playback = s,
            EngineEvent::Failed(msg) => {
                tracing::warn!(%msg, "engine reported failure");
                self.state.notice = Some(msg);
            }
        }
    }

    /// Playing → Paused, Paused/Idle → Playing. No-op with no track displayed.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if !self.state.has_track_displayed() {
            return Ok(());
        }
        if self.engine.is_playing() {
            self.engine.pause()
        } else {
            self.engine.play()
        }
    }

    /// Stop and rewind, then blank both labels. The track itself is kept.
    pub fn stop(&mut self) -> Result<()> {
        let result = self.engine.stop();
        self.state.labels.clear();
        result
    }

    /// Set the slider to `slider` and push `slider / 100` to the engine.
    pub fn set_volume(&mut self, slider: u8) -> Result<()> {
        self.state.volume = Volume::from_slider(slider);
        self.engine.set_volume(self.state.volume.normalized())
    }

    /// Move the slider by `steps` configured steps.
    pub fn nudge_volume(&mut self, steps: i16) -> Result<()> {
        let delta = steps.saturating_mul(i16::from(self.options.volume_step));
        let v = self.state.volume.nudged(delta);
        self.set_volume(v.slider())
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.state.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.state.notice = None;
    }
}
