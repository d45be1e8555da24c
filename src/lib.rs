//! Spaced-repetition flashcards for a clockless e-ink reader.
//!
//! Decks are tab-separated text files. Each card carries an SM-2 scheduling
//! record kept in a small binary file per deck, and "days" are counted in
//! device boots because the hardware has no real-time clock.
//!
//! # Examples
//!
//! Scheduling directly with the core types:
//! ```
//! use flashdeck::{
//!     config::StudyConfig,
//!     core::{session::StudySession, table::ReviewStateTable},
//!     deck::parse_tsv,
//!     types::Rating,
//! };
//!
//! let cards = parse_tsv(b"Capital\tParis\nRiver\tNile\n");
//! let mut table = ReviewStateTable::with_len(cards.len());
//! let mut session = StudySession::new();
//! assert_eq!(session.start(&table, 10, &StudyConfig::default()), 2);
//!
//! let outcome = session.rate(&mut table, 10, Rating::Good).expect("rate");
//! assert_eq!(outcome.state.due_day, 11);
//! ```
//!
//! Button-driven controller on the async runtime:
//! ```no_run
//! use flashdeck::{
//!     clock::DayClock,
//!     config::StudyConfig,
//!     controller::FlashcardController,
//!     deck::{DeckCatalog, DeckEntry},
//!     persist::fs::FsStorage,
//!     runtime::handle::{spawn_flashcards, RuntimeConfig},
//!     types::Button,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut storage = FsStorage::new("/mnt/sd");
//! let config = StudyConfig::default();
//! let today = DayClock::for_config(&config).current_day(&mut storage);
//! let catalog = DeckCatalog {
//!     name: "Flashcards".to_string(),
//!     path: "/apps/flashcards".to_string(),
//!     entries: vec![DeckEntry { title: "French".to_string(), file: "french.tsv".to_string() }],
//! };
//! let controller = FlashcardController::new(storage, catalog, today, config);
//! let handle = spawn_flashcards(controller, RuntimeConfig::default());
//! handle.press(Button::Confirm).await.expect("press");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Per-card content and scheduling records.
pub mod card;
/// Boot-count day numbers.
pub mod clock;
/// Button-driven screen state machine.
pub mod controller;
/// Scheduling core.
pub mod core;
/// Study configuration.
pub mod config;
/// Deck files and catalogs.
pub mod deck;
/// Storage abstraction, binary codec and backends.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
