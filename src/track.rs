//! The single selected audio file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;

use crate::chooser::ExtensionFilter;
use crate::error::{PlayerError, Result};

/// A chosen audio file and the name shown for it.
///
/// Immutable once built; choosing another file replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display_name: String,
    pub duration: Option<Duration>,
}

impl Track {
    /// Build a `Track` for `path`, rejecting files outside `filter`.
    pub fn from_path(path: impl Into<PathBuf>, filter: &ExtensionFilter) -> Result<Self> {
        let path = path.into();
        if !filter.matches(&path) {
            return Err(PlayerError::UnsupportedFormat { path });
        }

        let display_name = display_name(&path);
        let duration = probe_duration(&path);

        Ok(Self {
            path,
            display_name,
            duration,
        })
    }
}

/// Final path segment, extension included.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            (!d.is_zero()).then_some(d)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not probe duration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn filter() -> ExtensionFilter {
        ExtensionFilter::new(["mp3", "wav", "aac", "flac"])
    }

    #[test]
    fn display_name_is_final_segment_with_extension() {
        assert_eq!(display_name(Path::new("/music/album/song.mp3")), "song.mp3");
        assert_eq!(display_name(Path::new("song.flac")), "song.flac");
        assert_eq!(display_name(Path::new("/")), "");
    }

    #[test]
    fn from_path_rejects_unsupported_extensions() {
        let err = Track::from_path("/tmp/notes.txt", &filter()).unwrap_err();
        assert!(matches!(err, PlayerError::UnsupportedFormat { .. }));
    }

    #[test]
    fn from_path_keeps_path_and_tolerates_unprobeable_files() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("song.mp3");
        fs::write(&p, b"not a real mp3").unwrap();

        let track = Track::from_path(&p, &filter()).unwrap();
        assert_eq!(track.path, p);
        assert_eq!(track.display_name, "song.mp3");
        assert_eq!(track.duration, None);
    }
}
