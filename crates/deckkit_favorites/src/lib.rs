//! # DeckKit Favorites
//!
//! Lets users mark deck items as favorites and keeps that choice across
//! launches.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────┐   cached ids, flag, events
//! │ FavoriteContext  │
//! ├──────────────────┤   get / set / toggle per item type
//! │ FavoriteService  │
//! ├──────────────────┤   TOML values under string keys
//! │  KeyValueStore   │   MemoryStore | TomlFileStore
//! └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use deckkit_favorites::{FavoriteContext, TomlFileStore};
//!
//! let store = Arc::new(TomlFileStore::open("favorites.toml")?);
//! let favorites: FavoriteContext<Hobby, _, _> = FavoriteContext::from_store(store);
//!
//! favorites.toggle_is_favorite(&hobby)?;
//! let listed = favorites.filter(&hobbies);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod context;
pub mod error;
pub mod service;
pub mod store;

pub use context::{FavoriteContext, FavoriteEvent, SHOW_ONLY_FAVORITES_KEY};
pub use error::{FavoritesError, FavoritesResult};
pub use service::{
    favorites_key, Favoritable, FavoriteService, StoreFavoriteService, FAVORITES_KEY_PREFIX,
};
pub use store::{KeyValueStore, MemoryStore, TomlFileStore};
