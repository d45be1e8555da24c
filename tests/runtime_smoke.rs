use std::time::Duration;

use tempfile::TempDir;

use flashdeck::{
    config::StudyConfig,
    controller::FlashcardController,
    core::table::DeckStats,
    deck::{DeckCatalog, DeckEntry},
    persist::{self, fs::FsStorage, memory::MemStorage},
    runtime::{
        events::StudyEvent,
        handle::{RuntimeConfig, RuntimeError, spawn_flashcards},
    },
    types::{Button, Rating, Screen},
};

fn catalog() -> DeckCatalog {
    DeckCatalog {
        name: "Flashcards".to_string(),
        path: "/apps/fc".to_string(),
        entries: vec![DeckEntry {
            title: "Geography".to_string(),
            file: "geo.tsv".to_string(),
        }],
    }
}

async fn next_event(sub: &mut tokio::sync::broadcast::Receiver<StudyEvent>) -> StudyEvent {
    tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv")
}

#[tokio::test]
async fn button_presses_drive_a_review_and_events_follow_in_order() {
    let storage = MemStorage::new().with_file("/apps/fc/geo.tsv", "Capital\tParis\n");
    let controller = FlashcardController::new(storage, catalog(), 10, StudyConfig::default());
    let handle = spawn_flashcards(controller, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    assert!(handle.press(Button::Confirm).await.expect("open"));
    assert_eq!(
        next_event(&mut sub).await,
        StudyEvent::DeckOpened {
            index: 0,
            stats: DeckStats {
                total: 1,
                due: 0,
                new: 1,
                learned: 0,
            },
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        StudyEvent::ScreenChanged {
            screen: Screen::StudyMenu
        }
    );

    handle.press(Button::Confirm).await.expect("study");
    handle.press(Button::Confirm).await.expect("reveal");
    let view = handle.view().await.expect("view");
    assert_eq!(view.screen, Screen::ReviewBack);
    assert_eq!(view.back.as_deref(), Some("Paris"));
    assert_eq!(view.rating_cursor, Rating::Good);

    handle.press(Button::Confirm).await.expect("rate");

    let mut seen = Vec::new();
    loop {
        let evt = next_event(&mut sub).await;
        let done = matches!(evt, StudyEvent::ScreenChanged { screen: Screen::DeckDone });
        seen.push(evt);
        if done {
            break;
        }
    }
    assert_eq!(
        seen,
        vec![
            StudyEvent::ScreenChanged {
                screen: Screen::ReviewFront
            },
            StudyEvent::ScreenChanged {
                screen: Screen::ReviewBack
            },
            StudyEvent::CardRated {
                card: 0,
                rating: Rating::Good,
                interval: 1,
                due_day: 11,
                requeued: false,
            },
            StudyEvent::SessionFinished { reviewed: 1 },
            StudyEvent::StateSaved { saved: true },
            StudyEvent::ScreenChanged {
                screen: Screen::DeckDone
            },
        ]
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn open_deck_errors_come_back_to_the_caller() {
    let controller = FlashcardController::new(MemStorage::new(), catalog(), 1, StudyConfig::default());
    let handle = spawn_flashcards(controller, RuntimeConfig::default());

    assert!(matches!(handle.open_deck(0).await, Err(RuntimeError::Deck(_))));
    assert!(matches!(handle.open_deck(7).await, Err(RuntimeError::Deck(_))));
    assert_eq!(handle.view().await.expect("view").screen, Screen::DeckList);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn shutdown_checkpoints_and_closes_the_handle() {
    let tmp = TempDir::new().expect("tmp");
    std::fs::create_dir_all(tmp.path().join("apps/fc")).expect("mkdir");
    std::fs::write(tmp.path().join("apps/fc/geo.tsv"), "Capital\tParis\nRiver\tNile\n").expect("deck");

    let controller = FlashcardController::new(FsStorage::new(tmp.path()), catalog(), 4, StudyConfig::default());
    let handle = spawn_flashcards(controller, RuntimeConfig::default());

    handle.open_deck(0).await.expect("open");
    handle.press(Button::Confirm).await.expect("study");
    handle.press(Button::Right).await.expect("reveal");
    handle.press(Button::Right).await.expect("cursor");
    handle.press(Button::Confirm).await.expect("rate easy");

    assert!(handle.shutdown().await.expect("shutdown"));
    assert!(matches!(
        handle.press(Button::Confirm).await,
        Err(RuntimeError::ChannelClosed)
    ));

    let save_path = persist::save_file_path(persist::DEFAULT_DATA_DIR, "/apps/fc/geo.tsv");
    let raw = std::fs::read(tmp.path().join(save_path.trim_start_matches('/'))).expect("save file");
    let decoded = persist::codec::decode_states(&raw, 2).expect("decode");
    assert_eq!(decoded.saved_count, 2);
    assert_eq!(decoded.states[0].due_day, 5);
    assert!(decoded.states[1].is_new());
}
