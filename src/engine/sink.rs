//! Opening a file into a paused `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::{PlayerError, Result};

/// Create a paused `Sink` playing `path` from the start at `volume`.
pub(super) fn create_sink(stream: &OutputStream, path: &Path, volume: f32) -> Result<Sink> {
    let file = File::open(path).map_err(|e| PlayerError::source_load(path, e))?;

    let source =
        Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::source_load(path, e))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    Ok(sink)
}
