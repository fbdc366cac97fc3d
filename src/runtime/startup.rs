use crate::chooser::TerminalChooser;
use crate::config;
use crate::controller::Controller;
use crate::engine::AudioEngine;
use crate::error::{PlayerError, Result};

use super::Tui;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Enter the event loop (a track may or may not be playing).
    Ready,
    /// The user backed out of the first file prompt.
    Cancelled,
}

/// Prompt for the first track and autoplay it.
///
/// Load failures become a notice so the user can pick another file;
/// a broken terminal or a dead engine is fatal.
pub fn open_initial_track<E: AudioEngine>(
    terminal: &mut Tui,
    settings: &config::Settings,
    controller: &mut Controller<E>,
) -> Result<Startup> {
    let mut chooser = TerminalChooser::new(terminal, &settings.chooser);
    startup_outcome(controller.open_and_play(&mut chooser), controller)
}

pub(super) fn startup_outcome<E: AudioEngine>(
    result: Result<()>,
    controller: &mut Controller<E>,
) -> Result<Startup> {
    match result {
        Ok(()) => Ok(Startup::Ready),
        Err(PlayerError::FileSelectionCancelled) => Ok(Startup::Cancelled),
        Err(e @ (PlayerError::Io(_) | PlayerError::EngineGone)) => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "initial track could not be played");
            controller.set_notice(e.to_string());
            Ok(Startup::Ready)
        }
    }
}
