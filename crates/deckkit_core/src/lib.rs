//! # DeckKit Core
//!
//! Headless interaction model for presenting a collection of cards as a
//! swipeable stack, a horizontal row or a paged deck.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DECK PIPELINE                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Drag Events → Controller → Reorder → Layout → Transforms     │
//! │       ↓             ↓           ↓         ↓          ↓        │
//! │  Item filter   Threshold   SharedDeck  Visible    Host view   │
//! │                 + Edge      + Events   subset                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host owns rendering and gesture recognition. This crate only
//! decides which items are visible, where they go, and how the item list
//! is reordered in response to drags and shuffles.
//!
//! ## Example
//!
//! ```rust,ignore
//! use deckkit_core::{DeckConfig, DeckController, SharedDeck, Vec2};
//!
//! let deck = SharedDeck::new(cards);
//! let mut controller = DeckController::new(DeckConfig::default())?;
//!
//! deck.drag_changed(&mut controller, &top_card, Vec2::new(150.0, 0.0));
//! let swipe = deck.drag_ended(&mut controller);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod deck;
pub mod error;
pub mod events;
pub mod item;
pub mod layout;
pub mod math;
pub mod ordering;
pub mod shuffle;
pub mod view;

pub use config::{DeckConfig, DeckKitConfig, Direction, ShuffleConfig};
pub use controller::{
    is_past_threshold, DeckController, DragUpdate, InteractionState, Swipe, SwipeActions, SwipeEdge,
};
pub use deck::SharedDeck;
pub use error::{DeckError, DeckResult};
pub use events::{DeckEvent, EventBus, EventReceiver};
pub use item::DeckItem;
pub use math::{ItemTransform, Rect, Vec2};
pub use ordering::{ensure_unique_ids, ItemOrdering};
pub use shuffle::{ShuffleAnimator, ShuffleOffset, ShuffleOutcome};
pub use view::{CardFrame, HorizontalDeck, PageChange, PagedDeck, RowFrame, StackedDeck};
