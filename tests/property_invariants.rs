use proptest::prelude::*;

use flashdeck::{
    card::{CardState, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR},
    core::{
        queue::ReviewQueue,
        scheduler::{apply_rating, rate},
        table::ReviewStateTable,
    },
    persist::memory::MemStorage,
    types::Rating,
};

const SAVE_PATH: &str = "/.crosspoint/flashcards_42.bin";

fn rating_strategy() -> impl Strategy<Value = Rating> {
    (0usize..4).prop_map(Rating::from_index)
}

fn state_strategy() -> impl Strategy<Value = CardState> {
    (1.3f32..4.0, 0u16..=MAX_INTERVAL_DAYS, 0u16..50, 0u32..10_000).prop_map(
        |(ease_factor, interval, repetitions, due_day)| CardState {
            ease_factor,
            interval,
            repetitions,
            due_day,
        },
    )
}

proptest! {
    #[test]
    fn success_never_shrinks_interval(mut st in state_strategy(), good in any::<bool>(), today in 0u32..10_000) {
        prop_assume!(st.repetitions >= 2);
        let before = st.interval;
        let rating = if good { Rating::Good } else { Rating::Easy };
        apply_rating(&mut st, rating, today);
        prop_assert!(st.interval >= before);
        prop_assert!(st.interval <= MAX_INTERVAL_DAYS);
        prop_assert_eq!(st.due_day, today + u32::from(st.interval));
    }

    #[test]
    fn lapse_resets_streak(mut st in state_strategy(), hard in any::<bool>(), today in 0u32..10_000) {
        let rating = if hard { Rating::Hard } else { Rating::Again };
        apply_rating(&mut st, rating, today);
        prop_assert_eq!(st.repetitions, 0);
        prop_assert_eq!(st.interval, 1);
    }

    #[test]
    fn ease_stays_above_floor(ratings in prop::collection::vec(rating_strategy(), 1..200)) {
        let mut st = CardState::default();
        for (day, rating) in ratings.into_iter().enumerate() {
            apply_rating(&mut st, rating, day as u32);
            prop_assert!(st.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn due_cards_precede_capped_new_cards(states in prop::collection::vec(state_strategy(), 0..120), today in 0u32..10_000) {
        let queue = ReviewQueue::build(&states, today, 20);
        let idx = queue.as_slice();

        let first_new = idx.iter().position(|i| states[*i].is_new()).unwrap_or(idx.len());
        prop_assert!(idx[..first_new].iter().all(|i| states[*i].is_due(today)));
        prop_assert!(idx[first_new..].iter().all(|i| states[*i].is_new()));
        prop_assert!(idx.len() - first_new <= 20);

        let due_total = states.iter().filter(|s| s.is_due(today)).count();
        let new_total = states.iter().filter(|s| s.is_new()).count();
        prop_assert_eq!(first_new, due_total);
        prop_assert_eq!(idx.len() - first_new, new_total.min(20));
    }

    #[test]
    fn again_adds_exactly_one_occurrence(states in prop::collection::vec(state_strategy(), 1..40), pick in any::<prop::sample::Index>()) {
        let mut table = ReviewStateTable::from_states(states);
        let mut queue = ReviewQueue::build(table.states(), 10_000, 20);
        prop_assume!(!queue.is_empty());
        let position = pick.index(queue.len());
        let card = queue.get(position).expect("queued");
        let before = queue.len();

        let out = rate(&mut table, &mut queue, position, 10_000, Rating::Again).expect("rate");
        prop_assert!(out.requeued);
        prop_assert_eq!(queue.len(), before + 1);
        prop_assert_eq!(queue.as_slice().last().copied(), Some(card));
    }

    #[test]
    fn save_then_load_reproduces_every_field(states in prop::collection::vec(state_strategy(), 1..100)) {
        let mut storage = MemStorage::new();
        let saved = ReviewStateTable::from_states(states.clone());
        prop_assert!(saved.save(&mut storage, SAVE_PATH));

        let mut loaded = ReviewStateTable::with_len(states.len());
        prop_assert!(loaded.load(&storage, SAVE_PATH));
        for (a, b) in loaded.states().iter().zip(states.iter()) {
            prop_assert_eq!(a.ease_factor.to_bits(), b.ease_factor.to_bits());
            prop_assert_eq!((a.interval, a.repetitions, a.due_day), (b.interval, b.repetitions, b.due_day));
        }
    }

    #[test]
    fn grown_deck_keeps_old_state_and_defaults_new_cards(states in prop::collection::vec(state_strategy(), 1..60), extra in 1usize..40) {
        let mut storage = MemStorage::new();
        prop_assert!(ReviewStateTable::from_states(states.clone()).save(&mut storage, SAVE_PATH));

        let mut grown = ReviewStateTable::with_len(states.len() + extra);
        prop_assert!(grown.load(&storage, SAVE_PATH));
        prop_assert_eq!(&grown.states()[..states.len()], states.as_slice());
        prop_assert!(grown.states()[states.len()..].iter().all(|s| *s == CardState::default()));
    }
}
