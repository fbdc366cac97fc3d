use crate::config::Settings;

/// Settings to run with, plus why the defaults were used instead of the
/// user's config when that happened.
#[derive(Debug)]
pub struct Loaded {
    pub settings: Settings,
    pub fallback: Option<String>,
}

/// Load and validate the user's config. A bad or unreadable config never
/// stops the player; it runs on defaults and the reason is reported once
/// logging is up.
pub fn load_settings() -> Loaded {
    resolve(Settings::load().map_err(|e| format!("failed to load config: {e}")))
}

fn resolve(loaded: Result<Settings, String>) -> Loaded {
    let checked = loaded.and_then(|s| {
        s.validate()
            .map(|()| s)
            .map_err(|msg| format!("invalid config: {msg}"))
    });
    match checked {
        Ok(settings) => Loaded {
            settings,
            fallback: None,
        },
        Err(reason) => Loaded {
            settings: Settings::default(),
            fallback: Some(reason),
        },
    }
}
