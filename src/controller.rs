//! Screen state machine of the flashcard app.
//!
//! ```text
//! DeckList -> StudyMenu -> ReviewFront <-> ReviewBack -> DeckDone -> StudyMenu
//!                      \-> Browse -> StudyMenu
//! ```
//!
//! Review state is saved when a session runs out, when the reader backs out
//! of a review or the study menu, and on [`FlashcardController::exit`].

use serde::{Deserialize, Serialize};

use crate::{
    config::StudyConfig,
    core::{
        scheduler::RateOutcome,
        session::{SessionStep, StudySession},
        table::{DeckStats, ReviewStateTable},
    },
    deck::{Deck, DeckCatalog, DeckError},
    persist::{self, Storage},
    runtime::events::StudyEvent,
    types::{Button, CardIndex, DayNumber, Rating, Screen},
};

/// Everything a renderer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyView {
    /// Screen to draw.
    pub screen: Screen,
    /// App title from the catalog.
    pub app_name: String,
    /// Deck list entries.
    pub deck_titles: Vec<String>,
    /// Highlighted deck list entry.
    pub selected_deck: usize,
    /// Title of the loaded deck.
    pub deck_name: Option<String>,
    /// Counts for the loaded deck.
    pub stats: Option<DeckStats>,
    /// Front of the card under review or browse.
    pub front: Option<String>,
    /// Back of the card, only once revealed.
    pub back: Option<String>,
    /// Zero-based queue position during review.
    pub position: usize,
    /// Session queue length, re-queued cards included.
    pub queue_len: usize,
    /// Ratings applied this session.
    pub reviewed: usize,
    /// Highlighted rating button.
    pub rating_cursor: Rating,
    /// Card shown while browsing.
    pub browse_index: usize,
}

#[derive(Debug)]
struct LoadedDeck {
    deck: Deck,
    table: ReviewStateTable,
    save_path: String,
}

/// Flashcard app state driven by button presses.
pub struct FlashcardController<S: Storage> {
    storage: S,
    catalog: DeckCatalog,
    config: StudyConfig,
    today: DayNumber,
    screen: Screen,
    selected_deck: usize,
    loaded: Option<LoadedDeck>,
    session: StudySession,
    rating_cursor: Rating,
    browse_index: usize,
    browse_show_back: bool,
    exit_requested: bool,
    pending_events: Vec<StudyEvent>,
}

impl<S: Storage> FlashcardController<S> {
    /// `today` comes from the application's [`crate::clock::DayClock`].
    pub fn new(storage: S, catalog: DeckCatalog, today: DayNumber, config: StudyConfig) -> Self {
        Self {
            storage,
            catalog,
            config,
            today,
            screen: Screen::DeckList,
            selected_deck: 0,
            loaded: None,
            session: StudySession::new(),
            rating_cursor: Rating::Good,
            browse_index: 0,
            browse_show_back: false,
            exit_requested: false,
            pending_events: Vec::new(),
        }
    }

    /// Screen being shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Day number the controller schedules against.
    pub fn today(&self) -> DayNumber {
        self.today
    }

    /// Study limits in use.
    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Decks offered on the deck list.
    pub fn catalog(&self) -> &DeckCatalog {
        &self.catalog
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable backing storage.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consumes the controller without saving.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Loaded deck, if any.
    pub fn deck(&self) -> Option<&Deck> {
        self.loaded.as_ref().map(|l| &l.deck)
    }

    /// Review state of the loaded deck.
    pub fn table(&self) -> Option<&ReviewStateTable> {
        self.loaded.as_ref().map(|l| &l.table)
    }

    /// Current study session.
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// Counts for the loaded deck as of today.
    pub fn stats(&self) -> Option<DeckStats> {
        self.table().map(|t| t.stats(self.today))
    }

    /// Rating highlighted on the card back.
    pub fn rating_cursor(&self) -> Rating {
        self.rating_cursor
    }

    /// Set once Back is pressed on the deck list.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Takes the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<StudyEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Loads deck `index` and its saved review state, then shows the study menu.
    ///
    /// On failure nothing is loaded and the screen does not change.
    pub fn open_deck(&mut self, index: usize) -> Result<DeckStats, DeckError> {
        if self.loaded.is_some() {
            self.close_deck();
        }

        let entry = self.catalog.entries.get(index).ok_or(DeckError::OutOfRange {
            index,
            len: self.catalog.len(),
        })?;
        let path = format!("{}/{}", self.catalog.path, entry.file);
        let deck = Deck::load(&self.storage, entry.title.clone(), &path, self.config.max_deck_bytes)
            .inspect_err(|err| log::error!("failed to open deck: {err}"))?;

        // size first so appended cards keep their defaults after the load
        let mut table = ReviewStateTable::with_len(deck.len());
        let save_path = persist::save_file_path(&self.config.data_dir, &deck.path);
        table.load(&self.storage, &save_path);

        let stats = table.stats(self.today);
        self.loaded = Some(LoadedDeck {
            deck,
            table,
            save_path,
        });
        self.selected_deck = index;
        self.session.reset();
        self.browse_index = 0;
        self.browse_show_back = false;
        self.pending_events.push(StudyEvent::DeckOpened { index, stats });
        self.set_screen(Screen::StudyMenu);
        Ok(stats)
    }

    /// Saves and unloads the current deck, returning to the deck list.
    pub fn close_deck(&mut self) -> bool {
        let saved = self.save();
        self.loaded = None;
        self.session.reset();
        self.set_screen(Screen::DeckList);
        saved
    }

    /// Builds the session queue and shows its first card, or the done screen
    /// when nothing is due. Returns the queue length.
    pub fn start_study(&mut self) -> usize {
        let Some(loaded) = self.loaded.as_ref() else {
            return 0;
        };
        let len = self.session.start(&loaded.table, self.today, &self.config);
        self.rating_cursor = Rating::Good;
        if len == 0 {
            self.set_screen(Screen::DeckDone);
        } else {
            self.set_screen(Screen::ReviewFront);
        }
        len
    }

    /// Shows the back of the current card.
    pub fn reveal(&mut self) -> bool {
        if self.screen != Screen::ReviewFront {
            return false;
        }
        self.rating_cursor = Rating::Good;
        self.set_screen(Screen::ReviewBack);
        true
    }

    /// Rates the card under review and moves on. When the queue runs out the
    /// review state is saved and the done screen is shown.
    pub fn rate_current(&mut self, rating: Rating) -> Option<RateOutcome> {
        if !matches!(self.screen, Screen::ReviewFront | Screen::ReviewBack) {
            return None;
        }
        let loaded = self.loaded.as_mut()?;
        let outcome = match self.session.rate(&mut loaded.table, self.today, rating) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("cannot rate card: {err}");
                return None;
            }
        };
        self.pending_events.push(StudyEvent::CardRated {
            card: outcome.card,
            rating,
            interval: outcome.state.interval,
            due_day: outcome.state.due_day,
            requeued: outcome.requeued,
        });

        match self.session.advance() {
            SessionStep::Next(_) => {
                self.rating_cursor = Rating::Good;
                self.set_screen(Screen::ReviewFront);
            }
            SessionStep::Finished { reviewed } => {
                log::info!("study session finished: {reviewed} reviews");
                self.pending_events.push(StudyEvent::SessionFinished { reviewed });
                self.save();
                self.set_screen(Screen::DeckDone);
            }
        }
        Some(outcome)
    }

    /// Best-effort save of the loaded deck's review state.
    pub fn save(&mut self) -> bool {
        let Some(loaded) = self.loaded.as_ref() else {
            return false;
        };
        let saved = loaded.table.save(&mut self.storage, &loaded.save_path);
        self.pending_events.push(StudyEvent::StateSaved { saved });
        saved
    }

    /// App exit: saves whenever cards are loaded, mid-session or not.
    pub fn exit(&mut self) -> bool {
        if self.loaded.as_ref().is_some_and(|l| !l.deck.is_empty()) {
            self.save()
        } else {
            false
        }
    }

    /// Card currently under review.
    pub fn current_card(&self) -> Option<CardIndex> {
        match self.screen {
            Screen::ReviewFront | Screen::ReviewBack => self.session.current(),
            _ => None,
        }
    }

    /// Applies one button release. Returns true when the screen needs a redraw.
    pub fn handle_button(&mut self, button: Button) -> bool {
        match self.screen {
            Screen::DeckList => self.on_deck_list(button),
            Screen::StudyMenu => self.on_study_menu(button),
            Screen::ReviewFront => self.on_review_front(button),
            Screen::ReviewBack => self.on_review_back(button),
            Screen::DeckDone => {
                if matches!(button, Button::Back | Button::Confirm) {
                    self.set_screen(Screen::StudyMenu);
                    return true;
                }
                false
            }
            Screen::Browse => self.on_browse(button),
        }
    }

    /// Snapshot of everything on screen.
    pub fn view(&self) -> StudyView {
        let card = match self.screen {
            Screen::ReviewFront | Screen::ReviewBack => self.session.current(),
            Screen::Browse => Some(self.browse_index),
            _ => None,
        };
        let card = card.and_then(|i| self.deck().and_then(|d| d.card(i)));
        let show_back = match self.screen {
            Screen::ReviewBack => true,
            Screen::Browse => self.browse_show_back,
            _ => false,
        };

        StudyView {
            screen: self.screen,
            app_name: self.catalog.name.clone(),
            deck_titles: self.catalog.entries.iter().map(|e| e.title.clone()).collect(),
            selected_deck: self.selected_deck,
            deck_name: self.deck().map(|d| d.name.clone()),
            stats: self.stats(),
            front: card.map(|c| c.front.clone()),
            back: card.filter(|_| show_back).map(|c| c.back.clone()),
            position: self.session.position(),
            queue_len: self.session.queue().len(),
            reviewed: self.session.reviewed(),
            rating_cursor: self.rating_cursor,
            browse_index: self.browse_index,
        }
    }

    fn on_deck_list(&mut self, button: Button) -> bool {
        let count = self.catalog.len();
        match button {
            Button::Back => {
                self.exit_requested = true;
                false
            }
            Button::Down | Button::Right => {
                self.selected_deck = next_index(self.selected_deck, count);
                true
            }
            Button::Up | Button::Left => {
                self.selected_deck = previous_index(self.selected_deck, count);
                true
            }
            Button::Confirm => {
                // a failed load keeps the list visible
                let _ = self.open_deck(self.selected_deck);
                true
            }
        }
    }

    fn on_study_menu(&mut self, button: Button) -> bool {
        match button {
            Button::Back => {
                self.close_deck();
                true
            }
            Button::Confirm => {
                self.start_study();
                true
            }
            Button::Right | Button::Down => {
                self.browse_index = 0;
                self.browse_show_back = false;
                self.set_screen(Screen::Browse);
                true
            }
            Button::Left | Button::Up => false,
        }
    }

    fn on_review_front(&mut self, button: Button) -> bool {
        match button {
            Button::Back => {
                self.save();
                self.set_screen(Screen::StudyMenu);
                true
            }
            Button::Confirm | Button::Right | Button::Down => self.reveal(),
            Button::Left | Button::Up => false,
        }
    }

    fn on_review_back(&mut self, button: Button) -> bool {
        match button {
            Button::Back => {
                self.set_screen(Screen::ReviewFront);
                true
            }
            Button::Left | Button::Up => {
                let idx = self.rating_cursor.index();
                if idx == 0 {
                    return false;
                }
                self.rating_cursor = Rating::from_index(idx - 1);
                true
            }
            Button::Right | Button::Down => {
                let idx = self.rating_cursor.index();
                if idx + 1 >= Rating::ALL.len() {
                    return false;
                }
                self.rating_cursor = Rating::from_index(idx + 1);
                true
            }
            Button::Confirm => {
                self.rate_current(self.rating_cursor);
                true
            }
        }
    }

    fn on_browse(&mut self, button: Button) -> bool {
        let count = self.deck().map_or(0, Deck::len);
        match button {
            Button::Back => {
                self.set_screen(Screen::StudyMenu);
                true
            }
            Button::Confirm => {
                self.browse_show_back = !self.browse_show_back;
                true
            }
            Button::Down | Button::Right => {
                self.browse_index = next_index(self.browse_index, count);
                self.browse_show_back = false;
                true
            }
            Button::Up | Button::Left => {
                self.browse_index = previous_index(self.browse_index, count);
                self.browse_show_back = false;
                true
            }
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.pending_events.push(StudyEvent::ScreenChanged { screen });
        }
    }
}

fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + len - 1) % len }
}
