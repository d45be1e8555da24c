use serde::{Deserialize, Serialize};

use crate::{
    card::CardState,
    persist::{self, PersistResult, Storage, codec},
    types::{CardIndex, DayNumber},
};

/// Card counts shown on the study menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeckStats {
    /// Cards in the deck.
    pub total: usize,
    /// Rated cards due today or earlier.
    pub due: usize,
    /// Cards never rated.
    pub new: usize,
    /// Rated cards scheduled after today.
    pub learned: usize,
}

/// Scheduling records for one deck, index-aligned with its cards.
///
/// Saved state is matched to cards purely by position, so decks may grow by
/// appending lines but must not be reordered between saves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewStateTable {
    states: Vec<CardState>,
}

impl ReviewStateTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// `len` default records.
    pub fn with_len(len: usize) -> Self {
        Self {
            states: vec![CardState::default(); len],
        }
    }

    /// Wraps existing records.
    pub fn from_states(states: Vec<CardState>) -> Self {
        Self { states }
    }

    /// Grows with default records or truncates to `len`.
    pub fn resize(&mut self, len: usize) {
        self.states.resize(len, CardState::default());
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Record of card `index`.
    pub fn get(&self, index: CardIndex) -> Option<&CardState> {
        self.states.get(index)
    }

    /// Mutable record of card `index`.
    pub fn get_mut(&mut self, index: CardIndex) -> Option<&mut CardState> {
        self.states.get_mut(index)
    }

    /// All records in card order.
    pub fn states(&self) -> &[CardState] {
        &self.states
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Counts cards by new, due and learned as of `today`.
    pub fn stats(&self, today: DayNumber) -> DeckStats {
        let mut stats = DeckStats {
            total: self.states.len(),
            ..DeckStats::default()
        };
        for st in &self.states {
            if st.is_new() {
                stats.new += 1;
            } else if st.is_due(today) {
                stats.due += 1;
            } else {
                stats.learned += 1;
            }
        }
        stats
    }

    /// Writes every record to `path`, creating its directory.
    pub fn try_save(&self, storage: &mut dyn Storage, path: &str) -> PersistResult<()> {
        persist::write_with_parent(storage, path, &codec::encode_states(&self.states))
    }

    /// Reads `path` and overwrites the leading `min(saved, len)` records.
    ///
    /// The table is untouched unless the whole file decodes.
    pub fn try_load(&mut self, storage: &dyn Storage, path: &str) -> PersistResult<usize> {
        let bytes = storage.read(path)?;
        let decoded = codec::decode_states(&bytes, self.states.len())?;
        let applied = decoded.states.len();
        self.states[..applied].copy_from_slice(&decoded.states);
        log::debug!(
            "loaded review state from {path} ({} saved, {applied} applied)",
            decoded.saved_count
        );
        Ok(applied)
    }

    /// Best-effort save. An empty table is never written.
    pub fn save(&self, storage: &mut dyn Storage, path: &str) -> bool {
        if self.states.is_empty() {
            return false;
        }
        match self.try_save(storage, path) {
            Ok(()) => {
                log::debug!("saved review state for {} cards to {path}", self.states.len());
                true
            }
            Err(err) => {
                log::error!("failed to save review state {path}: {err}");
                false
            }
        }
    }

    /// Best-effort load. Missing, foreign-version or damaged files leave the
    /// defaults in place and return `false`.
    pub fn load(&mut self, storage: &dyn Storage, path: &str) -> bool {
        match self.try_load(storage, path) {
            Ok(_) => true,
            Err(persist::PersistError::NotFound(_)) => false,
            Err(err) => {
                log::warn!("ignoring review state {path}: {err}");
                false
            }
        }
    }
}
