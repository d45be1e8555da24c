//! Progress events for the rendering surface.

use crate::{
    core::table::DeckStats,
    types::{CardIndex, DayNumber, Rating, Screen},
};

/// Events emitted by the flashcard controller, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyEvent {
    /// The visible screen changed.
    ScreenChanged {
        /// New screen.
        screen: Screen,
    },
    /// A deck finished loading.
    DeckOpened {
        /// Catalog index.
        index: usize,
        /// Counts as of today.
        stats: DeckStats,
    },
    /// A card was rated.
    CardRated {
        /// Rated card.
        card: CardIndex,
        /// Rating applied.
        rating: Rating,
        /// New interval in days.
        interval: u16,
        /// New due day.
        due_day: DayNumber,
        /// Card was appended to the queue again.
        requeued: bool,
    },
    /// The session queue ran out.
    SessionFinished {
        /// Ratings applied in the session.
        reviewed: usize,
    },
    /// A save of the review state was attempted.
    StateSaved {
        /// Whether it reached storage.
        saved: bool,
    },
}
