//! # DeckKit
//!
//! Swipeable card decks for any host UI.
//!
//! - [`deck`]: ordering, layout, interaction controller, shuffle, views
//! - [`favorites`]: favorite tracking and persistence
//! - [`hobby`]: a small demo data set
//!
//! The most used types are re-exported at the crate root.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod hobby;

pub use deckkit_core as deck;
pub use deckkit_favorites as favorites;

pub use deckkit_core::{
    CardFrame, DeckConfig, DeckController, DeckError, DeckEvent, DeckItem, DeckKitConfig,
    DeckResult, Direction, HorizontalDeck, ItemOrdering, ItemTransform, PagedDeck, Rect,
    SharedDeck, ShuffleAnimator, ShuffleConfig, ShuffleOutcome, StackedDeck, Swipe, SwipeActions,
    SwipeEdge, Vec2,
};
pub use deckkit_favorites::{
    Favoritable, FavoriteContext, FavoriteEvent, FavoriteService, FavoritesError,
    FavoritesResult, KeyValueStore, MemoryStore, StoreFavoriteService, TomlFileStore,
};
