use crate::{
    card::CardState,
    types::{CardIndex, DayNumber},
};

/// Ordered card indices for one study session.
///
/// Due cards come first, then new cards, each in deck order. Cards rated
/// `Again` are appended again, so an index may repeat and the queue can
/// outgrow the deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    indices: Vec<CardIndex>,
    due: usize,
    new: usize,
}

impl ReviewQueue {
    /// Queues every card due by `today`, then at most `new_cap` new cards.
    pub fn build(states: &[CardState], today: DayNumber, new_cap: usize) -> Self {
        let mut indices: Vec<CardIndex> = states
            .iter()
            .enumerate()
            .filter(|(_, st)| st.is_due(today))
            .map(|(i, _)| i)
            .collect();
        let due = indices.len();

        indices.extend(
            states
                .iter()
                .enumerate()
                .filter(|(_, st)| st.is_new())
                .map(|(i, _)| i)
                .take(new_cap),
        );
        let new = indices.len() - due;

        log::debug!("review queue: {} cards ({due} due + {new} new)", indices.len());

        Self { indices, due, new }
    }

    /// Entries left to show plus those already shown.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no card was queued.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Card at queue `position`.
    pub fn get(&self, position: usize) -> Option<CardIndex> {
        self.indices.get(position).copied()
    }

    /// Queue entries in presentation order.
    pub fn as_slice(&self) -> &[CardIndex] {
        &self.indices
    }

    /// Due cards admitted at build time.
    pub fn due_count(&self) -> usize {
        self.due
    }

    /// New cards admitted at build time.
    pub fn new_count(&self) -> usize {
        self.new
    }

    /// Appends `index` for another pass.
    pub fn requeue(&mut self, index: CardIndex) {
        self.indices.push(index);
    }

    /// Empties the queue and its counters.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.due = 0;
        self.new = 0;
    }
}
