//! Shared primitive aliases and small enums.

use serde::{Deserialize, Serialize};

/// Absolute day number derived from the boot counter.
pub type DayNumber = u32;
/// Index into a deck's card list (and its index-aligned state table).
pub type CardIndex = usize;

/// Recall rating offered to the reader after revealing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Total failure; the card is shown again later in the same session.
    Again,
    /// Recalled with serious difficulty; counts as a lapse.
    Hard,
    /// Recalled after some hesitation.
    Good,
    /// Recalled instantly.
    Easy,
}

impl Rating {
    /// All ratings in button order.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Maps a button index (0..=3) to a rating. Anything else is treated as `Good`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Again,
            1 => Self::Hard,
            2 => Self::Good,
            3 => Self::Easy,
            _ => Self::Good,
        }
    }

    /// Button index of this rating.
    pub fn index(self) -> usize {
        match self {
            Self::Again => 0,
            Self::Hard => 1,
            Self::Good => 2,
            Self::Easy => 3,
        }
    }

    /// SM-2 quality grade (0..=5). Grades 1 and 4 are never produced.
    pub fn quality(self) -> u8 {
        match self {
            Self::Again => 0,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 5,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Again => "Again",
            Self::Hard => "Hard",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }
}

/// Physical front/side buttons of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Leave the current screen.
    Back,
    /// Select / accept.
    Confirm,
    /// Front left.
    Left,
    /// Front right.
    Right,
    /// Side up.
    Up,
    /// Side down.
    Down,
}

/// Screen the flashcard app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Pick a deck from the catalog.
    DeckList,
    /// Deck stats with study / browse choices.
    StudyMenu,
    /// Front of the current review card.
    ReviewFront,
    /// Back of the current review card plus rating buttons.
    ReviewBack,
    /// Session finished or nothing to review.
    DeckDone,
    /// Read-only walk through every card.
    Browse,
}
