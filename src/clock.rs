//! Boot-count day numbers for a device without a real-time clock.
//!
//! Every boot counts as one elapsed day. The counter lives in a 4-byte file
//! and is bumped the first time [`DayClock::current_day`] runs in a boot;
//! later calls return the cached value.

use crate::{
    config::StudyConfig,
    persist::{self, DEFAULT_DATA_DIR, PersistError, Storage, codec},
    types::DayNumber,
};

/// Day counter owned by the application root and handed to the study controller.
#[derive(Debug, Clone)]
pub struct DayClock {
    path: String,
    cached: Option<DayNumber>,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(persist::day_file_path(DEFAULT_DATA_DIR))
    }
}

impl DayClock {
    /// Counter file at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    /// Counter file inside the configured data directory.
    pub fn for_config(config: &StudyConfig) -> Self {
        Self::new(persist::day_file_path(&config.data_dir))
    }

    /// A clock that already knows today's number and never touches storage.
    pub fn fixed(day: DayNumber) -> Self {
        Self {
            path: String::new(),
            cached: Some(day),
        }
    }

    /// Location of the counter file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Day computed earlier in this boot, if any.
    pub fn cached(&self) -> Option<DayNumber> {
        self.cached
    }

    /// Returns today's day number, advancing the persisted counter on the
    /// first call of this boot. Storage failures never prevent a result.
    pub fn current_day(&mut self, storage: &mut dyn Storage) -> DayNumber {
        if let Some(day) = self.cached {
            return day;
        }

        let day = match storage.read(&self.path) {
            Ok(bytes) => match codec::decode_day(&bytes) {
                Ok(saved) => saved.saturating_add(1),
                Err(err) => {
                    log::warn!("day counter {} unreadable ({err}); restarting at 1", self.path);
                    1
                }
            },
            Err(PersistError::NotFound(_)) => 1,
            Err(err) => {
                log::warn!("day counter {} unreadable ({err}); restarting at 1", self.path);
                1
            }
        };

        if let Err(err) = persist::write_with_parent(storage, &self.path, &codec::encode_day(day)) {
            log::warn!("failed to persist day counter {}: {err}", self.path);
        }

        self.cached = Some(day);
        day
    }
}
