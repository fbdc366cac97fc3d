use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::{PlayerError, Result};

use super::sink::create_sink;
use super::types::{EngineCmd, EngineEvent, PlaybackHandle, PlaybackState, clamp_volume};

/// How often the thread samples the sink position.
const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut engine = EngineThread::new(events, playback_info);
        loop {
            match rx.recv_timeout(TICK) {
                Ok(EngineCmd::Quit { fade_out_ms }) => {
                    engine.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            engine.tick();
        }
        tracing::debug!("engine thread exiting");
    })
}

struct EngineThread {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    volume: f32,
    state: PlaybackState,
    last_position_ms: Option<u64>,
    events: Sender<EngineEvent>,
    playback_info: PlaybackHandle,
}

impl EngineThread {
    fn new(events: Sender<EngineEvent>, playback_info: PlaybackHandle) -> Self {
        let volume = playback_info.lock().map(|i| i.volume).unwrap_or(1.0);
        Self {
            stream: None,
            sink: None,
            source: None,
            volume,
            state: PlaybackState::Idle,
            last_position_ms: None,
            events,
            playback_info,
        }
    }

    fn handle(&mut self, cmd: EngineCmd) {
        tracing::debug!(?cmd, "engine command");
        match cmd {
            EngineCmd::Open { path, reply } => {
                let result = self.open(path);
                if let Err(ref e) = result {
                    tracing::warn!(error = %e, "open failed");
                }
                // The caller may have given up waiting; nothing to do then.
                let _ = reply.send(result);
            }
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => {
                if self.state == PlaybackState::Playing {
                    if let Some(ref s) = self.sink {
                        s.pause();
                    }
                    self.set_state(PlaybackState::Paused);
                }
            }
            EngineCmd::Stop => self.stop(),
            EngineCmd::SetVolume(v) => {
                self.volume = clamp_volume(v);
                if let Some(ref s) = self.sink {
                    s.set_volume(self.volume);
                }
                if let Ok(mut info) = self.playback_info.lock() {
                    info.volume = self.volume;
                }
            }
            EngineCmd::Quit { .. } => {}
        }
    }

    /// Lazily bind the default output device.
    fn output(&mut self) -> Result<&OutputStream> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| PlayerError::OutputUnavailable(e.to_string()))?;
            // rodio logs to stderr when OutputStream is dropped; that would scribble over the TUI.
            stream.log_on_drop(false);
            tracing::info!("audio output opened");
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| PlayerError::OutputUnavailable("no output stream".into()))
    }

    fn open(&mut self, path: PathBuf) -> Result<()> {
        let volume = self.volume;
        let new_sink = create_sink(self.output()?, &path, volume)?;

        if let Some(old) = self.sink.replace(new_sink) {
            old.stop();
        }
        tracing::info!(path = %path.display(), "source opened");
        self.source = Some(path.clone());
        if let Ok(mut info) = self.playback_info.lock() {
            info.source = Some(path);
        }
        self.reset_position();
        self.set_state(PlaybackState::Idle);
        Ok(())
    }

    fn play(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };

        // After a stop or at end of track the sink is gone or drained; rebuild from the start.
        if self.sink.as_ref().is_none_or(Sink::empty) {
            let volume = self.volume;
            let rebuilt = self
                .output()
                .and_then(|stream| create_sink(stream, &path, volume));
            match rebuilt {
                Ok(s) => {
                    self.sink = Some(s);
                    self.reset_position();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not restart source");
                    self.sink = None;
                    self.set_state(PlaybackState::Idle);
                    let _ = self.events.send(EngineEvent::Failed(e.to_string()));
                    return;
                }
            }
        }

        if let Some(ref s) = self.sink {
            s.play();
        }
        self.set_state(PlaybackState::Playing);
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.reset_position();
        self.set_state(PlaybackState::Idle);
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.take() {
            if self.state == PlaybackState::Playing {
                fade_out_sink(&s, self.volume, fade_out_ms);
            }
            s.stop();
        }
        // Keep shared state honest so the UI/MPRIS don't keep showing Playing.
        self.set_state(PlaybackState::Idle);
    }

    /// Sample the sink: publish position changes and notice end of track.
    fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(ref s) = self.sink else {
            return;
        };

        if s.empty() {
            tracing::info!("end of track");
            self.set_state(PlaybackState::Idle);
            return;
        }

        let ms = s.get_pos().as_millis().min(u64::MAX as u128) as u64;
        if self.last_position_ms != Some(ms) {
            self.last_position_ms = Some(ms);
            let _ = self.events.send(EngineEvent::PositionChanged(ms));
        }
    }

    fn reset_position(&mut self) {
        self.last_position_ms = None;
    }

    fn set_state(&mut self, state: PlaybackState) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.state = state;
        }
        if self.state != state {
            self.state = state;
            let _ = self.events.send(EngineEvent::StateChanged(state));
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
