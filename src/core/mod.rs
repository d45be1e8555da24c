//! Scheduling core: state table, queue builder, SM-2 and session cursor.

/// Session queue construction.
pub mod queue;
/// SM-2 update rule.
pub mod scheduler;
/// Session cursor and counters.
pub mod session;
/// Per-card scheduling records and their persistence.
pub mod table;
