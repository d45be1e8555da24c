use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    controller::{FlashcardController, StudyView},
    core::table::DeckStats,
    deck::DeckError,
    persist::Storage,
    types::Button,
};

use super::events::StudyEvent;

/// Errors returned through a [`FlashcardHandle`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Opening a deck failed.
    #[error(transparent)]
    Deck(#[from] DeckError),
    /// The controller task has stopped.
    #[error("flashcard runtime is gone")]
    ChannelClosed,
}

/// Channel sizes of the runtime task.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Commands buffered before senders wait.
    pub command_queue_bound: usize,
    /// Events kept for slow subscribers before they lag.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 64,
            event_capacity: 256,
        }
    }
}

/// Cloneable handle to a controller running on its own task.
pub struct FlashcardHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<StudyEvent>,
}

impl Clone for FlashcardHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Press {
        button: Button,
        resp: oneshot::Sender<bool>,
    },
    OpenDeck {
        index: usize,
        resp: oneshot::Sender<Result<DeckStats, RuntimeError>>,
    },
    View {
        resp: oneshot::Sender<StudyView>,
    },
    Save {
        resp: oneshot::Sender<bool>,
    },
    Shutdown {
        resp: oneshot::Sender<bool>,
    },
}

/// Moves `controller` onto a task that applies commands one at a time.
///
/// Must be called inside a tokio runtime.
pub fn spawn_flashcards<S>(controller: FlashcardController<S>, config: RuntimeConfig) -> FlashcardHandle
where
    S: Storage + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<StudyEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut controller = controller;

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut controller, &events_tx_loop);
            if done {
                break;
            }
        }
    });

    FlashcardHandle { cmd_tx, events_tx }
}

impl FlashcardHandle {
    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StudyEvent> {
        self.events_tx.subscribe()
    }

    /// Delivers one button release. Returns whether a redraw is needed.
    pub async fn press(&self, button: Button) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Press { button, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Loads deck `index` and shows its study menu.
    pub async fn open_deck(&self, index: usize) -> Result<DeckStats, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::OpenDeck { index, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Snapshot of the current screen.
    pub async fn view(&self) -> Result<StudyView, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::View { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Checkpoints the loaded deck's review state.
    pub async fn save(&self) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Save { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Runs the app-exit save and stops the task. Returns whether a save
    /// reached storage.
    pub async fn shutdown(&self) -> Result<bool, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<S: Storage>(
    cmd: Command,
    controller: &mut FlashcardController<S>,
    events_tx: &broadcast::Sender<StudyEvent>,
) -> bool {
    // events go out before the reply so callers observe them once it resolves
    match cmd {
        Command::Press { button, resp } => {
            let redraw = controller.handle_button(button);
            publish(controller, events_tx);
            let _ = resp.send(redraw);
        }
        Command::OpenDeck { index, resp } => {
            let res = controller.open_deck(index).map_err(RuntimeError::from);
            publish(controller, events_tx);
            let _ = resp.send(res);
        }
        Command::View { resp } => {
            let _ = resp.send(controller.view());
        }
        Command::Save { resp } => {
            let saved = controller.save();
            publish(controller, events_tx);
            let _ = resp.send(saved);
        }
        Command::Shutdown { resp } => {
            let saved = controller.exit();
            publish(controller, events_tx);
            let _ = resp.send(saved);
            return true;
        }
    }

    false
}

fn publish<S: Storage>(controller: &mut FlashcardController<S>, events_tx: &broadcast::Sender<StudyEvent>) {
    for event in controller.drain_events() {
        // no subscribers is fine
        let _ = events_tx.send(event);
    }
}
