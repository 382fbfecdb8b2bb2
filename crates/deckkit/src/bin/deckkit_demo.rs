//! # DeckKit Demo
//!
//! Headless walkthrough of a hobby deck: swipes, a shuffle, paging, a
//! scrolling row and favorites.
//!
//! Usage: `deckkit_demo [CONFIG.toml] [FAVORITES.toml]`
//!
//! Set `RUST_LOG=deckkit_core=debug` to watch the controller transitions.

use std::sync::Arc;

use deckkit::hobby::{demo_collection, Hobby};
use deckkit::{
    DeckController, DeckEvent, DeckKitConfig, FavoriteContext, HorizontalDeck, KeyValueStore,
    MemoryStore, PagedDeck, Rect, SharedDeck, ShuffleAnimator, StackedDeck,
    StoreFavoriteService, SwipeActions, SwipeEdge, TomlFileStore, Vec2,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Store = Arc<dyn KeyValueStore>;
type Favorites = FavoriteContext<Hobby, StoreFavoriteService<Store>, Store>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => DeckKitConfig::load(&path)?,
        None => DeckKitConfig::default(),
    };
    let store: Store = match args.next() {
        Some(path) => Arc::new(TomlFileStore::open(&path)?),
        None => Arc::new(MemoryStore::new()),
    };
    let favorites: Arc<Favorites> = Arc::new(FavoriteContext::from_store(store));

    println!("═══════════════════════════════════════════════════════════");
    println!("                     DECKKIT DEMO");
    println!("═══════════════════════════════════════════════════════════");

    let deck = SharedDeck::try_new(demo_collection())?;
    let events = deck.subscribe();

    let actions = {
        let favorites = Arc::clone(&favorites);
        SwipeActions::new()
            .on_swipe(|edge, hobby: &Hobby| println!("   swiped {:<12} {:?}", hobby.name, edge))
            .on_trailing(move |hobby: &Hobby| {
                if let Err(error) = favorites.set_is_favorite(true, hobby) {
                    tracing::warn!("Could not save favorite {}: {}", hobby.name, error);
                }
            })
    };
    let controller = DeckController::new(config.deck)?.with_actions(actions);
    let shuffler = Arc::new(ShuffleAnimator::new(config.shuffle)?);
    let mut stack = StackedDeck::new(deck.clone(), controller, shuffler);

    println!();
    println!("Stack ({} cards, {} visible):", deck.len(), stack.frame().len());
    print_top(&stack, 3);

    println!();
    println!("Swiping...");
    let gestures = [
        Vec2::new(160.0, 0.0),
        Vec2::new(-160.0, 0.0),
        Vec2::new(40.0, 20.0),
        Vec2::new(0.0, -320.0),
        Vec2::new(140.0, 30.0),
    ];
    for target in gestures {
        let Some(top) = deck.get(0) else { break };
        for step in 1..=4u8 {
            let progress = f32::from(step) / 4.0;
            stack.drag_changed(&top, target * progress);
        }
        if stack.drag_ended().is_none() {
            println!("   released {:<10} back on the stack", top.name);
        }
    }
    print_top(&stack, 3);

    println!();
    println!("Shuffling...");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let outcome = runtime.block_on(stack.shuffle(config.shuffle.default_times));
    let steps = events
        .drain()
        .into_iter()
        .filter(|event| matches!(event, DeckEvent::ShuffleStep { .. }))
        .count();
    println!("   {outcome:?} after {steps} animation steps");
    print_top(&stack, 3);

    println!();
    println!("Paging:");
    let mut pages = PagedDeck::new(deck.clone(), 320.0)?;
    for offset in [-200.0, -40.0, -200.0, 150.0] {
        pages.drag_changed(Vec2::new(offset, 0.0));
        let change = pages.drag_ended();
        let name = pages.current_item().map_or_else(|| "-".to_owned(), |hobby| hobby.name);
        println!("   drag {offset:>6.0} -> page {} ({name}) {change:?}", pages.current_page());
    }

    println!();
    println!("Row viewport 0..360:");
    let row = HorizontalDeck::new(deck.clone(), 100.0, 140.0)?.with_gap(12.0);
    for frame in row.frames(Rect::new(0.0, 0.0, 360.0, 140.0)) {
        println!("   {:<12} x = {:>5.1}", frame.item_id, frame.rect.x);
    }

    println!();
    favorites.set_show_only_favorites(true)?;
    let hobbies = deck.snapshot();
    let shown: Vec<&str> = favorites.filter(&hobbies).iter().map(|h| h.name.as_str()).collect();
    println!("Favorites (swiped {:?}): {shown:?}", SwipeEdge::Trailing);

    Ok(())
}

fn print_top(stack: &StackedDeck<Hobby>, count: usize) {
    for frame in stack.frame().iter().take(count) {
        let t = frame.transform;
        println!(
            "   {:<12} scale {:.2}  offset {:>5.1}  z {:>4.1}",
            frame.item_id, t.scale, t.vertical_offset, t.z_order
        );
    }
}
