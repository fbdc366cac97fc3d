//! Audio engine: the playback backend the controller drives.
//!
//! `AudioEngine` is the capability the controller needs. `RodioEngine`
//! implements it with a dedicated thread that owns the `rodio` output
//! stream and sink, and reports position and state changes as
//! `EngineEvent`s.

mod player;
mod sink;
mod thread;
mod types;

use std::path::Path;

use crate::error::Result;

pub use player::RodioEngine;
pub use types::*;

/// Operations the controller issues against an audio backend.
pub trait AudioEngine {
    /// Bind an output and make `path` the current source, paused at 0.
    fn open(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Stop playback and rewind the source to 0.
    fn stop(&mut self) -> Result<()>;
    fn is_playing(&self) -> bool;
    /// `volume` is normalized to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}
