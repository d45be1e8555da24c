use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use flashdeck::{
    card::CardState,
    core::{queue::ReviewQueue, scheduler::rate, table::ReviewStateTable},
    deck::parse_tsv,
    types::Rating,
};

fn mixed_states(n: usize) -> Vec<CardState> {
    (0..n)
        .map(|i| match i % 3 {
            0 => CardState::default(),
            1 => CardState {
                interval: 6,
                repetitions: 2,
                due_day: (i % 40) as u32,
                ..CardState::default()
            },
            _ => CardState {
                interval: 30,
                repetitions: 4,
                due_day: 1_000,
                ..CardState::default()
            },
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..2_000 {
        text.push_str(&format!("front {i}\tback {i}\r\n"));
    }
    c.bench_function("parse_tsv_2k", |b| {
        b.iter(|| parse_tsv(text.as_bytes()));
    });
}

fn bench_queue_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_build");
    for n in [100usize, 1_000, 10_000] {
        let states = mixed_states(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &states, |b, states| {
            b.iter(|| ReviewQueue::build(states, 20, 20));
        });
    }
    group.finish();
}

fn bench_rating(c: &mut Criterion) {
    c.bench_function("rate_session_1k", |b| {
        b.iter(|| {
            let mut table = ReviewStateTable::from_states(mixed_states(1_000));
            let mut queue = ReviewQueue::build(table.states(), 20, 20);
            let mut position = 0;
            while position < queue.len() {
                let rating = Rating::from_index(position % 4);
                let _ = rate(&mut table, &mut queue, position, 20, rating).expect("rate");
                position += 1;
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_queue_build, bench_rating);
criterion_main!(benches);
