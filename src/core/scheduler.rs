//! SM-2 scheduling.
//!
//! Ratings map to quality grades Again=0, Hard=2, Good=3, Easy=5. Grades
//! below 3 are lapses: the repetition streak resets and the card comes back
//! tomorrow. Successful grades grow the interval 1, 6, then `interval * ease`
//! (rounded, capped at a year). The ease factor moves on every rating:
//!
//! ```text
//! EF' = max(1.3, EF + 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    card::{CardState, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR},
    core::{queue::ReviewQueue, table::ReviewStateTable},
    types::{CardIndex, DayNumber, Rating},
};

/// Inconsistencies between the queue and the state table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// No queue entry at `position`.
    #[error("queue position {position} out of range ({len} queued)")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Queue length.
        len: usize,
    },
    /// The queued index is past the end of the table.
    #[error("queued card {0} has no review state")]
    MissingState(CardIndex),
}

/// What a rating did to one card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateOutcome {
    /// Rated card.
    pub card: CardIndex,
    /// Rating applied.
    pub rating: Rating,
    /// State after the update.
    pub state: CardState,
    /// True when the card was appended to the session queue again.
    pub requeued: bool,
}

/// Ease factor after a review graded `quality`.
pub fn next_ease_factor(ease_factor: f32, quality: u8) -> f32 {
    let miss = 5.0 - f32::from(quality);
    let ef = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
    ef.max(MIN_EASE_FACTOR)
}

/// Applies `rating` to `state` as of `today`.
pub fn apply_rating(state: &mut CardState, rating: Rating, today: DayNumber) {
    let q = rating.quality();

    if q < 3 {
        state.repetitions = 0;
        state.interval = 1;
    } else {
        state.repetitions = state.repetitions.saturating_add(1);
        state.interval = match state.repetitions {
            1 => 1,
            2 => 6,
            _ => {
                let grown = (f32::from(state.interval) * state.ease_factor).round();
                if grown.is_nan() {
                    1
                } else {
                    grown.clamp(1.0, f32::from(MAX_INTERVAL_DAYS)) as u16
                }
            }
        };
    }

    state.ease_factor = next_ease_factor(state.ease_factor, q);
    state.due_day = today.saturating_add(u32::from(state.interval));
}

/// Rates the card at `position` in `queue` and re-queues it on `Again`.
pub fn rate(
    table: &mut ReviewStateTable,
    queue: &mut ReviewQueue,
    position: usize,
    today: DayNumber,
    rating: Rating,
) -> Result<RateOutcome, ScheduleError> {
    let card = queue.get(position).ok_or(ScheduleError::PositionOutOfRange {
        position,
        len: queue.len(),
    })?;
    let state = table.get_mut(card).ok_or(ScheduleError::MissingState(card))?;

    apply_rating(state, rating, today);
    let state = *state;

    let requeued = rating == Rating::Again;
    if requeued {
        queue.requeue(card);
    }

    Ok(RateOutcome {
        card,
        rating,
        state,
        requeued,
    })
}
