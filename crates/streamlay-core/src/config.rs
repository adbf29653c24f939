//! Runtime configuration read from the environment.
//!
//! - `STREAMLAY_DATA_DIR`: directory holding `presets.json` (defaults to the
//!   Tauri app data dir)
//! - `STREAMLAY_OFFSCREEN_MARGIN`: gap in pixels between the virtual desktop and
//!   a parked overlay
//! - `STREAMLAY_TOGGLE_SHORTCUT`: global shortcut toggling all overlays, empty
//!   to disable

use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "STREAMLAY_DATA_DIR";
pub const OFFSCREEN_MARGIN_ENV: &str = "STREAMLAY_OFFSCREEN_MARGIN";
pub const TOGGLE_SHORTCUT_ENV: &str = "STREAMLAY_TOGGLE_SHORTCUT";

pub const DEFAULT_OFFSCREEN_MARGIN: i32 = 100;
pub const DEFAULT_TOGGLE_SHORTCUT: &str = "ctrl+shift+h";
pub const PRESET_FILE_NAME: &str = "presets.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: Option<PathBuf>,
    pub offscreen_margin: i32,
    pub toggle_shortcut: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            offscreen_margin: DEFAULT_OFFSCREEN_MARGIN,
            toggle_shortcut: Some(DEFAULT_TOGGLE_SHORTCUT.to_string()),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unparseable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let offscreen_margin = match lookup(OFFSCREEN_MARGIN_ENV) {
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(margin) if margin >= 0 => margin,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring invalid {}, using {}",
                        OFFSCREEN_MARGIN_ENV,
                        defaults.offscreen_margin
                    );
                    defaults.offscreen_margin
                }
            },
            None => defaults.offscreen_margin,
        };

        let toggle_shortcut = match lookup(TOGGLE_SHORTCUT_ENV) {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.trim().to_string()),
            None => defaults.toggle_shortcut,
        };

        Self {
            data_dir,
            offscreen_margin,
            toggle_shortcut,
        }
    }
}
