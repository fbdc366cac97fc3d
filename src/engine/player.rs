use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::{PlayerError, Result};

use super::AudioEngine;
use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineEvent, PlaybackHandle, PlaybackInfo, PlaybackState, clamp_volume};

/// How long `open` waits for the engine thread to decode the source header.
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

/// `AudioEngine` backed by a rodio thread.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    playback: PlaybackHandle,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Spawn the engine thread. Events arrive on the returned receiver.
    pub fn spawn() -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_engine_thread(rx, event_tx, playback.clone());

        let engine = Self {
            tx,
            playback,
            join: Some(join),
        };
        (engine, event_rx)
    }

    #[cfg(test)]
    pub(super) fn from_parts(tx: Sender<EngineCmd>, playback: PlaybackHandle) -> Self {
        Self {
            tx,
            playback,
            join: None,
        }
    }

    fn send(&self, cmd: EngineCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| PlayerError::EngineGone)
    }

    /// Apply `f` to the shared info right away so queries made before the
    /// engine thread catches up see the commanded state.
    fn update_info(&self, f: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut info) = self.playback.lock() {
            f(&mut info);
        }
    }

    /// Ask the engine thread to fade out and exit, then wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(EngineCmd::Quit {
            fade_out_ms: fade_out.as_millis().min(u64::MAX as u128) as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioEngine for RodioEngine {
    fn open(&mut self, path: &Path) -> Result<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(EngineCmd::Open {
            path: path.to_path_buf(),
            reply: reply_tx,
        })?;

        match reply_rx.recv_timeout(OPEN_TIMEOUT) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PlayerError::source_load(
                path,
                "timed out waiting for the audio engine",
            )),
            Err(RecvTimeoutError::Disconnected) => Err(PlayerError::EngineGone),
        }
    }

    fn play(&mut self) -> Result<()> {
        self.send(EngineCmd::Play)?;
        self.update_info(|info| {
            if info.source.is_some() {
                info.state = PlaybackState::Playing;
            }
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.send(EngineCmd::Pause)?;
        self.update_info(|info| {
            if info.state == PlaybackState::Playing {
                info.state = PlaybackState::Paused;
            }
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.send(EngineCmd::Stop)?;
        self.update_info(|info| info.state = PlaybackState::Idle);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playback
            .lock()
            .map(|info| info.state == PlaybackState::Playing)
            .unwrap_or(false)
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        let volume = clamp_volume(volume);
        self.send(EngineCmd::SetVolume(volume))?;
        self.update_info(|info| info.volume = volume);
        Ok(())
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.quit_softly(Duration::ZERO);
        }
    }
}
