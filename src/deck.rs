//! Tab-separated deck files and the catalog of decks an app offers.
//!
//! One card per line, `front<TAB>back`. Lines starting with `#` are comments,
//! blank lines are ignored, and `\r` is accepted as a line break so CRLF
//! exports (Anki's "notes in plain text") load unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    card::Card,
    persist::{PersistError, Storage},
};

/// Reasons a deck cannot be opened.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The file could not be read.
    #[error("cannot read deck {path}: {source}")]
    Storage {
        /// Deck file.
        path: String,
        /// Storage failure.
        #[source]
        source: PersistError,
    },
    /// The file has no bytes.
    #[error("deck file is empty: {0}")]
    Empty(String),
    /// No line yielded a card.
    #[error("no valid cards in {0}")]
    NoCards(String),
    /// Catalog has no deck at `index`.
    #[error("deck index {index} out of range ({len} decks)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Decks in the catalog.
        len: usize,
    },
}

/// One deck listed in an app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Title shown in the deck list.
    pub title: String,
    /// File name relative to the app folder.
    pub file: String,
}

/// Already-parsed app manifest for a flashcard app.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeckCatalog {
    /// App display name.
    pub name: String,
    /// Absolute app folder, e.g. `/apps/flashcards`.
    pub path: String,
    /// Decks in display order.
    #[serde(default)]
    pub entries: Vec<DeckEntry>,
}

impl DeckCatalog {
    /// Number of decks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the app lists no decks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute path of deck `index`.
    pub fn deck_path(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .map(|e| format!("{}/{}", self.path, e.file))
    }
}

/// Cards of one loaded deck, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Title from the catalog.
    pub name: String,
    /// Absolute file path, also the key of the save file.
    pub path: String,
    /// Parsed cards. Never empty.
    pub cards: Vec<Card>,
}

impl Deck {
    /// Parses `bytes`, failing when no card survives.
    pub fn from_bytes(name: impl Into<String>, path: impl Into<String>, bytes: &[u8]) -> Result<Self, DeckError> {
        let path = path.into();
        let cards = parse_tsv(bytes);
        log::debug!("parsed {} cards from {path}", cards.len());
        if cards.is_empty() {
            return Err(DeckError::NoCards(path));
        }
        Ok(Self {
            name: name.into(),
            path,
            cards,
        })
    }

    /// Reads at most `max_bytes` of the file at `path` and parses it.
    pub fn load(storage: &dyn Storage, name: impl Into<String>, path: &str, max_bytes: usize) -> Result<Self, DeckError> {
        let bytes = storage
            .read_prefix(path, max_bytes)
            .map_err(|source| DeckError::Storage {
                path: path.to_string(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(DeckError::Empty(path.to_string()));
        }
        Self::from_bytes(name, path, &bytes)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for a deck without cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index`.
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }
}

/// Parses deck text into cards, skipping comments, blank lines, lines with no
/// tab and lines with an empty front.
pub fn parse_tsv(bytes: &[u8]) -> Vec<Card> {
    let mut cards = Vec::new();
    let end = bytes.len();
    let mut pos = 0;

    while pos < end {
        while pos < end && is_line_break(bytes[pos]) {
            pos += 1;
        }
        if pos >= end {
            break;
        }

        let line_end = bytes[pos..]
            .iter()
            .position(|b| is_line_break(*b))
            .map_or(end, |off| pos + off);
        let line = &bytes[pos..line_end];
        pos = line_end;

        if line[0] == b'#' {
            continue;
        }

        // first tab only; later tabs belong to the back
        let Some(tab) = line.iter().position(|b| *b == b'\t') else {
            continue;
        };
        if tab == 0 {
            continue;
        }

        let front = String::from_utf8_lossy(&line[..tab]).into_owned();
        let mut back = String::from_utf8_lossy(&line[tab + 1..]).into_owned();
        while back.ends_with('\r') {
            back.pop();
        }
        cards.push(Card { front, back });
    }

    cards
}

fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}
