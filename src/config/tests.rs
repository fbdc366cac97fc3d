use super::load::{default_config_path, resolve_config_path, state_dir};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_lonetrack_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LONETRACK_CONFIG_PATH", "/tmp/lonetrack-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lonetrack-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lonetrack")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("lonetrack")
            .join("config.toml")
    );
}

#[test]
fn state_dir_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/lonetrack")
    );
}

#[test]
fn defaults_match_single_track_player() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 20);
    assert_eq!(s.chooser.caption, "Select a file");
    assert_eq!(
        s.chooser.extensions,
        vec!["mp3".to_string(), "wav".into(), "aac".into(), "flac".into()]
    );
    assert_eq!(s.ui.elapsed_format, ElapsedFormat::Clock);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.chooser.extensions = vec![" ".into(), ".".into()];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 35
volume_step = 10
quit_fade_out_ms = 0

[chooser]
caption = "Pick one"
initial_dir = "/srv/music"
extensions = ["flac"]
recursive = false
include_hidden = true

[ui]
header_text = "hello"
elapsed_format = "total-seconds"

[log]
file = "/tmp/lonetrack.log"
filter = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LONETRACK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LONETRACK__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 35);
    assert_eq!(s.audio.volume_step, 10);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.chooser.caption, "Pick one");
    assert_eq!(s.chooser.initial_dir, std::path::PathBuf::from("/srv/music"));
    assert_eq!(s.chooser.extensions, vec!["flac".to_string()]);
    assert!(!s.chooser.recursive);
    assert!(s.chooser.include_hidden);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.elapsed_format, ElapsedFormat::TotalSeconds);
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/lonetrack.log"))
    );
    assert_eq!(s.log.filter, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 50
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LONETRACK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LONETRACK__AUDIO__INITIAL_VOLUME", "80");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 80);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("absent.toml");
    let _g1 = EnvGuard::set("LONETRACK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LONETRACK__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 20);
    assert_eq!(s.ui.elapsed_format, ElapsedFormat::Clock);
}
