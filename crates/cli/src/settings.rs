use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use speakeasy_core::pipeline::score_recording_use_case::DEFAULT_MAX_PASSAGE_CHARS;
use speakeasy_core::progress::domain::contribution_grid::DEFAULT_CONTRIBUTION_MONTHS;

const APP_DIR: &str = "SpeakEasy";

/// Items listed by `items --recent` unless configured otherwise.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_file: PathBuf,
    pub contribution_months: u32,
    pub max_passage_chars: usize,
    pub recent_limit: usize,
}

fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_default()
        .join("library.json")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            contribution_months: DEFAULT_CONTRIBUTION_MONTHS,
            max_passage_chars: DEFAULT_MAX_PASSAGE_CHARS,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("settings.json"))
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Missing or malformed files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    log::warn!("Ignoring malformed settings at {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default()
    }
}
