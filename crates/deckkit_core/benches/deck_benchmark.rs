//! Benchmark for the per-frame drag path.
//!
//! TARGET: a drag tick plus a full frame well under 1ms for a 1,000 card deck
//!
//! Run with: cargo bench --package deckkit_core --bench deck_benchmark

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use deckkit_core::layout::visible_items;
use deckkit_core::{
    DeckConfig, DeckController, DeckItem, ItemOrdering, SharedDeck, ShuffleAnimator,
    ShuffleConfig, StackedDeck, Vec2,
};

#[derive(Debug, Clone)]
struct BenchCard {
    id: u64,
}

impl DeckItem for BenchCard {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

fn create_cards(count: u64) -> Vec<BenchCard> {
    (0..count).map(|id| BenchCard { id }).collect()
}

fn benchmark_reorder(c: &mut Criterion) {
    let mut items = create_cards(1_000);
    let target = items[0].clone();

    c.bench_function("move_to_back_and_front_1k", |b| {
        b.iter(|| {
            items.move_to_back(black_box(&target));
            items.move_to_front(black_box(&target));
        });
    });
}

fn benchmark_visible_items(c: &mut Criterion) {
    let items = create_cards(1_000);
    let config = DeckConfig::default();

    c.bench_function("visible_items_1k", |b| {
        b.iter(|| black_box(visible_items(black_box(&items), &config)));
    });
}

fn benchmark_drag_frame(c: &mut Criterion) {
    let mut view = StackedDeck::new(
        SharedDeck::new(create_cards(1_000)),
        DeckController::new(DeckConfig::default()).unwrap(),
        Arc::new(ShuffleAnimator::with_seed(ShuffleConfig::default(), 0).unwrap()),
    );
    let top = view.deck().get(0).unwrap();

    let mut group = c.benchmark_group("drag_frame");
    group.throughput(Throughput::Elements(1));

    group.bench_function("drag_tick_and_frame_1k", |b| {
        let mut x = 0.0_f32;
        b.iter(|| {
            // Oscillate across the threshold so every tick reorders.
            x = if x > 100.0 { 0.0 } else { x + 60.0 };
            view.drag_changed(&top, Vec2::new(x, 0.0));
            black_box(view.frame())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reorder,
    benchmark_visible_items,
    benchmark_drag_frame
);
criterion_main!(benches);
