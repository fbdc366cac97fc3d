use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::chooser::TerminalChooser;
use crate::config;
use crate::controller::Controller;
use crate::engine::{AudioEngine, EngineEvent};
use crate::error::{PlayerError, Result};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::ui;

use super::Tui;
use super::mpris_sync::{MprisSnapshot, update_mpris};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last state pushed to MPRIS.
    last_mpris: Option<MprisSnapshot>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { last_mpris: None }
    }
}

/// Something the user asked for from the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    TogglePlayPause,
    Stop,
    VolumeUp,
    VolumeDown,
    Open,
    Reload,
    Quit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: drains engine events and MPRIS commands,
/// redraws, then handles one key. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Tui,
    settings: &config::Settings,
    controller: &mut Controller<E>,
    engine_events: &Receiver<EngineEvent>,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        // Engine events are applied in delivery order; the label shows the latest.
        while let Ok(ev) = engine_events.try_recv() {
            controller.on_engine_event(ev);
        }

        let snapshot = MprisSnapshot::of(controller.state());
        if state.last_mpris.as_ref() != Some(&snapshot) {
            update_mpris(mpris, controller.state());
            state.last_mpris = Some(snapshot);
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                controller.state(),
                &settings.ui,
                settings.audio.volume_step,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, controller) == Flow::Quit {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = action_for_key(key) else {
                    continue;
                };
                if apply_action(action, terminal, settings, controller)? == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

pub(super) fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePlayPause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => Some(Action::VolumeUp),
        KeyCode::Char('-') | KeyCode::Left => Some(Action::VolumeDown),
        KeyCode::Char('o') => Some(Action::Open),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn apply_action<E: AudioEngine>(
    action: Action,
    terminal: &mut Tui,
    settings: &config::Settings,
    controller: &mut Controller<E>,
) -> Result<Flow> {
    let result = match action {
        Action::Quit => return Ok(Flow::Quit),
        Action::Open => {
            let mut chooser = TerminalChooser::new(terminal, &settings.chooser);
            match controller.open_and_play(&mut chooser) {
                // Terminal trouble inside the chooser is not something a notice can fix.
                Err(e @ PlayerError::Io(_)) => return Err(e),
                other => other,
            }
        }
        other => apply_playback_action(other, controller),
    };
    report(controller, result);
    Ok(Flow::Continue)
}

/// Actions that only touch the controller.
pub(super) fn apply_playback_action<E: AudioEngine>(
    action: Action,
    controller: &mut Controller<E>,
) -> Result<()> {
    match action {
        Action::TogglePlayPause => controller.toggle_play_pause(),
        Action::Stop => controller.stop(),
        Action::VolumeUp => controller.nudge_volume(1),
        Action::VolumeDown => controller.nudge_volume(-1),
        Action::Reload => controller.reload(),
        Action::Open | Action::Quit => Ok(()),
    }
}

pub(super) fn handle_control_cmd<E: AudioEngine>(
    cmd: ControlCmd,
    controller: &mut Controller<E>,
) -> Flow {
    tracing::debug!(?cmd, "MPRIS command");
    let result = match cmd {
        ControlCmd::Quit => return Flow::Quit,
        ControlCmd::PlayPause => controller.toggle_play_pause(),
        ControlCmd::Play => {
            if controller.engine().is_playing() {
                Ok(())
            } else {
                controller.toggle_play_pause()
            }
        }
        ControlCmd::Pause => {
            if controller.engine().is_playing() {
                controller.toggle_play_pause()
            } else {
                Ok(())
            }
        }
        ControlCmd::Stop => controller.stop(),
        ControlCmd::SetVolume(v) => controller.set_volume(v),
    };
    report(controller, result);
    Flow::Continue
}

/// Surface a failed operation to the user instead of dropping it.
fn report<E: AudioEngine>(controller: &mut Controller<E>, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(PlayerError::FileSelectionCancelled) => controller.clear_notice(),
        Err(e) => {
            tracing::warn!(error = %e, "operation failed");
            controller.set_notice(e.to_string());
        }
    }
}
