//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Natively they are read from the JSON
//! file named by `PING_PONG_SETTINGS`, and command-line flags override them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{PADDLE_STEP, ROUNDS_PER_MATCH, TICK_INTERVAL_MS};
use crate::input::KeyMap;
use crate::sim::Rules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u32,
    /// Rounds before the match is decided
    pub rounds_per_match: u32,
    /// Paddle travel per key press
    pub paddle_step: f32,
    /// Keyboard bindings
    pub keys: KeyMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            rounds_per_match: ROUNDS_PER_MATCH,
            paddle_step: PADDLE_STEP,
            keys: KeyMap::default(),
        }
    }
}

impl Settings {
    /// Environment variable holding the native settings file path
    pub const ENV_VAR: &'static str = "PING_PONG_SETTINGS";

    /// Longest accepted tick interval (one minute)
    pub const MAX_TICK_INTERVAL_MS: u32 = 60_000;

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "ping_pong_settings";

    /// Match rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            rounds_per_match: self.rounds_per_match,
            paddle_step: self.paddle_step,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.tick_interval_ms == 0 {
            log::warn!("tick_interval_ms must be positive, using 1");
            self.tick_interval_ms = 1;
        } else if self.tick_interval_ms > Self::MAX_TICK_INTERVAL_MS {
            log::warn!(
                "tick_interval_ms {} is too long, using {}",
                self.tick_interval_ms,
                Self::MAX_TICK_INTERVAL_MS
            );
            self.tick_interval_ms = Self::MAX_TICK_INTERVAL_MS;
        }
        if self.rounds_per_match == 0 {
            log::warn!("rounds_per_match must be positive, using 1");
            self.rounds_per_match = 1;
        }
        if !(self.paddle_step.is_finite() && self.paddle_step > 0.0) {
            log::warn!(
                "paddle_step {} is invalid, using {}",
                self.paddle_step,
                defaults.paddle_step
            );
            self.paddle_step = defaults.paddle_step;
        }
        self
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `PING_PONG_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load_from_path(std::path::Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
