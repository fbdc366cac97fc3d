use std::io::Stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::controller::{Controller, ControllerOptions};
use crate::engine::RodioEngine;
use crate::error::{PlayerError, Result};
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<()> {
    let settings::Loaded { settings, fallback } = settings::load_settings();
    let log_path = logging::init(&settings.log);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "starting lonetrack");
    if let Some(reason) = fallback {
        tracing::warn!(%reason, "using default settings");
    }

    let (engine, engine_events) = RodioEngine::spawn();
    let mut controller = Controller::new(engine, ControllerOptions::from(&settings));

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<()> = (|| {
        match startup::open_initial_track(&mut terminal, &settings, &mut controller)? {
            startup::Startup::Cancelled => return Err(PlayerError::FileSelectionCancelled),
            startup::Startup::Ready => {}
        }

        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            &engine_events,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    controller
        .engine_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match run_result {
        // Backing out of the first prompt is a normal way to leave.
        Err(PlayerError::FileSelectionCancelled) => {
            eprintln!("lonetrack: no file selected");
            tracing::info!("exiting: no file selected");
            Ok(())
        }
        other => {
            tracing::info!(ok = other.is_ok(), "exiting");
            other
        }
    }
}
