use crate::{
    config::StudyConfig,
    core::{
        queue::ReviewQueue,
        scheduler::{self, RateOutcome, ScheduleError},
        table::ReviewStateTable,
    },
    types::{CardIndex, DayNumber, Rating},
};

/// Result of moving past the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Another card is up.
    Next(CardIndex),
    /// The queue is exhausted; the caller should persist the table.
    Finished {
        /// Ratings applied during the session.
        reviewed: usize,
    },
}

/// Cursor over one session's queue plus its counters.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    queue: ReviewQueue,
    position: usize,
    reviewed: usize,
}

impl StudySession {
    /// Idle session with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh queue and resets the counters. Returns the queue length.
    pub fn start(&mut self, table: &ReviewStateTable, today: DayNumber, config: &StudyConfig) -> usize {
        self.queue = ReviewQueue::build(table.states(), today, config.new_cards_per_session);
        self.position = 0;
        self.reviewed = 0;
        self.queue.len()
    }

    /// Card under the cursor, `None` once the session is complete.
    pub fn current(&self) -> Option<CardIndex> {
        self.queue.get(self.position)
    }

    /// Rates the current card. The cursor does not move.
    pub fn rate(
        &mut self,
        table: &mut ReviewStateTable,
        today: DayNumber,
        rating: Rating,
    ) -> Result<RateOutcome, ScheduleError> {
        let outcome = scheduler::rate(table, &mut self.queue, self.position, today, rating)?;
        self.reviewed += 1;
        Ok(outcome)
    }

    /// Moves the cursor one entry forward.
    pub fn advance(&mut self) -> SessionStep {
        if self.position < self.queue.len() {
            self.position += 1;
        }
        match self.current() {
            Some(card) => SessionStep::Next(card),
            None => SessionStep::Finished {
                reviewed: self.reviewed,
            },
        }
    }

    /// True once the cursor is past the last entry.
    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Cursor position in the queue.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Ratings applied since `start`.
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    /// This session's queue.
    pub fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    /// Entries not yet shown, the current one included.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// Drops the queue and counters.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.position = 0;
        self.reviewed = 0;
    }
}
