//! Study tuning knobs with JSON overrides.

use serde::{Deserialize, Serialize};

use crate::persist::{DEFAULT_DATA_DIR, PersistError, PersistResult, Storage};

/// Optional override file read by [`StudyConfig::load_or_default`].
pub const DEFAULT_CONFIG_PATH: &str = "/.crosspoint/flashcards.json";

/// Limits and locations used by the flashcard engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Never-reviewed cards admitted into one session.
    pub new_cards_per_session: usize,
    /// Deck files are read up to this many bytes; the rest is ignored.
    pub max_deck_bytes: usize,
    /// Directory for save files and the day counter.
    pub data_dir: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            new_cards_per_session: 20,
            max_deck_bytes: 4095,
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl StudyConfig {
    /// Parses a JSON object; absent fields keep their defaults.
    pub fn from_json_slice(bytes: &[u8]) -> PersistResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Reads overrides from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load_or_default(storage: &dyn Storage, path: &str) -> Self {
        match storage.read(path).and_then(|bytes| Self::from_json_slice(&bytes)) {
            Ok(cfg) => cfg,
            Err(PersistError::NotFound(_)) => Self::default(),
            Err(err) => {
                log::warn!("ignoring flashcard config {path}: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::memory::MemStorage;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = StudyConfig::from_json_slice(br#"{"new_cards_per_session": 5}"#).expect("parse");
        assert_eq!(cfg.new_cards_per_session, 5);
        assert_eq!(cfg.max_deck_bytes, 4095);
        assert_eq!(cfg.data_dir, "/.crosspoint");
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let storage = MemStorage::new();
        assert_eq!(
            StudyConfig::load_or_default(&storage, DEFAULT_CONFIG_PATH),
            StudyConfig::default()
        );

        let storage = MemStorage::new().with_file(DEFAULT_CONFIG_PATH, "{not json");
        assert_eq!(
            StudyConfig::load_or_default(&storage, DEFAULT_CONFIG_PATH),
            StudyConfig::default()
        );
    }
}
