use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lonetrack/config.toml` or `~/.config/lonetrack/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LONETRACK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub chooser: ChooserSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Slider position (0-100) applied when a track is loaded.
    pub initial_volume: u8,
    /// How far one volume key press moves the slider.
    pub volume_step: u8,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 20,
            volume_step: 5,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChooserSettings {
    /// Text shown at the top of the file chooser.
    pub caption: String,
    /// Directory the chooser lists, relative to the working directory unless absolute.
    pub initial_dir: PathBuf,
    /// File extensions offered by the chooser (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Whether to list hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks while listing.
    pub follow_links: bool,
}

impl Default for ChooserSettings {
    fn default() -> Self {
        Self {
            caption: "Select a file".to_string(),
            initial_dir: PathBuf::from("Audio_Files"),
            extensions: vec!["mp3".into(), "wav".into(), "aac".into(), "flac".into()],
            recursive: true,
            max_depth: None,
            include_hidden: false,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How the elapsed-time label renders a position.
    pub elapsed_format: ElapsedFormat,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ one track, no fuss ~ ".to_string(),
            elapsed_format: ElapsedFormat::Clock,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElapsedFormat {
    /// `m:ss`, seconds wrapped to 0-59.
    #[default]
    #[serde(alias = "mm-ss", alias = "mm_ss")]
    Clock,
    /// `m:s` where `s` is the total elapsed seconds (`2:125`).
    #[serde(alias = "total_seconds", alias = "legacy")]
    TotalSeconds,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/lonetrack/lonetrack.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive used when `LONETRACK_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
