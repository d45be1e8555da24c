//! Card content and per-card SM-2 scheduling records.

use serde::{Deserialize, Serialize};

use crate::types::DayNumber;

/// Ease factor assigned to a card that has never been reviewed.
pub const DEFAULT_EASE_FACTOR: f32 = 2.5;
/// Lowest ease factor a card may reach.
pub const MIN_EASE_FACTOR: f32 = 1.3;
/// Longest interval, in days, the scheduler will assign.
pub const MAX_INTERVAL_DAYS: u16 = 365;

/// One front/back pair parsed from a deck file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Prompt side. Never empty.
    pub front: String,
    /// Answer side. May be empty.
    pub back: String,
}

impl Card {
    /// Builds a card from its two sides.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Mutable scheduling record, index-aligned with the deck's cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    /// Interval multiplier, never below [`MIN_EASE_FACTOR`].
    pub ease_factor: f32,
    /// Days until the next review; 0 marks a card that was never rated.
    pub interval: u16,
    /// Consecutive successful recalls since the last lapse.
    pub repetitions: u16,
    /// Day on which the card becomes eligible again.
    pub due_day: DayNumber,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            due_day: 0,
        }
    }
}

impl CardState {
    /// True when the card was never rated.
    pub fn is_new(&self) -> bool {
        self.interval == 0
    }

    /// True when a previously rated card is due on or before `today`.
    pub fn is_due(&self, today: DayNumber) -> bool {
        self.interval > 0 && self.due_day <= today
    }

    /// True when a previously rated card is scheduled after `today`.
    pub fn is_learned(&self, today: DayNumber) -> bool {
        self.interval > 0 && self.due_day > today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_new_and_never_due() {
        let st = CardState::default();
        assert!(st.is_new());
        assert!(!st.is_due(100));
        assert!(!st.is_learned(0));
        assert_eq!(st.ease_factor, DEFAULT_EASE_FACTOR);
    }

    #[test]
    fn due_and_learned_split_on_today() {
        let st = CardState {
            interval: 6,
            due_day: 15,
            ..CardState::default()
        };
        assert!(!st.is_due(10));
        assert!(st.is_learned(10));
        assert!(st.is_due(15));
        assert!(!st.is_learned(15));
    }
}
