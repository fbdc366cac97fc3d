//! `tracing` setup. Output goes to a file; stderr belongs to the TUI.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, state_dir};

/// Environment variable overriding `log.filter`.
pub const LOG_ENV: &str = "LONETRACK_LOG";

/// Install the global subscriber. Returns the log path when logging is active.
///
/// Any failure (no writable location, bad filter, subscriber already set)
/// leaves logging disabled.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let path = log_path(settings)?;
    let file = open_log_file(&path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(settings))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(path)
}

fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings
        .file
        .clone()
        .or_else(|| state_dir().map(|d| d.join("lonetrack.log")))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

pub(crate) fn build_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::{EnvGuard, env_lock};
    use tempfile::tempdir;

    fn filter_with(setting: &str) -> String {
        let settings = LogSettings {
            filter: setting.to_string(),
            ..LogSettings::default()
        };
        build_filter(&settings).to_string().to_lowercase()
    }

    #[test]
    fn explicit_log_file_wins() {
        let settings = LogSettings {
            file: Some(PathBuf::from("/tmp/custom.log")),
            ..LogSettings::default()
        };
        assert_eq!(log_path(&settings), Some(PathBuf::from("/tmp/custom.log")));
    }

    #[test]
    fn open_log_file_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("lonetrack.log");
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }

    #[test]
    fn env_filter_beats_configured_filter() {
        let _lock = env_lock();
        let _g = EnvGuard::set(LOG_ENV, "lonetrack=trace");
        assert_eq!(filter_with("warn"), "lonetrack=trace");
    }

    #[test]
    fn configured_filter_applies_without_env() {
        let _lock = env_lock();
        let _g = EnvGuard::remove(LOG_ENV);
        assert_eq!(filter_with("lonetrack=debug"), "lonetrack=debug");
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        let _lock = env_lock();
        let _g = EnvGuard::remove(LOG_ENV);
        assert_eq!(filter_with("lonetrack=loudest"), "info");
    }

    #[test]
    fn invalid_env_filter_falls_through_to_configured_filter() {
        let _lock = env_lock();
        let _g = EnvGuard::set(LOG_ENV, "lonetrack=loudest");
        assert_eq!(filter_with("debug"), "debug");
    }
}
