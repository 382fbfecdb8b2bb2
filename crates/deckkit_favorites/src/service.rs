//! Favorite services.
//!
//! Favorite ids are stored per item type under
//! `deckkit.favorites.<TypeName>`, in insertion order.

use deckkit_core::DeckItem;
use serde::de::DeserializeOwned;
use serde::Serialize;
use toml::Value;

use crate::error::FavoritesResult;
use crate::store::KeyValueStore;

/// Prefix of every favorites key.
pub const FAVORITES_KEY_PREFIX: &str = "deckkit.favorites";

/// An item that can be marked as a favorite.
pub trait Favoritable: DeckItem {
    /// Type name used in the storage key.
    ///
    /// Defaults to the last path segment of the type name. Generic types
    /// should override it so every instantiation gets a stable key.
    #[must_use]
    fn favorite_type_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Storage key of the favorites of `I`.
#[must_use]
pub fn favorites_key<I: Favoritable>() -> String {
    format!("{FAVORITES_KEY_PREFIX}.{}", I::favorite_type_name())
}

/// Reads and changes favorite state.
pub trait FavoriteService {
    /// Ids of every favorite `I`, in the order they were marked.
    fn get_favorites<I>(&self) -> Vec<I::Id>
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned;

    /// Marks or unmarks `item` as a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be stored.
    fn set_is_favorite<I>(&self, is_favorite: bool, item: &I) -> FavoritesResult<()>
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned;

    /// Returns true if `item` is a favorite.
    fn is_favorite<I>(&self, item: &I) -> bool
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned,
    {
        self.get_favorites::<I>().contains(item.id())
    }

    /// Flips the favorite state of `item` and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be stored.
    fn toggle_is_favorite<I>(&self, item: &I) -> FavoritesResult<bool>
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned,
    {
        let is_favorite = !self.is_favorite(item);
        self.set_is_favorite(is_favorite, item)?;
        Ok(is_favorite)
    }
}

/// Favorite service on top of a [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct StoreFavoriteService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreFavoriteService<S> {
    /// Creates a service writing to `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> FavoriteService for StoreFavoriteService<S> {
    fn get_favorites<I>(&self) -> Vec<I::Id>
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned,
    {
        let key = favorites_key::<I>();
        let Some(value) = self.store.get(&key) else {
            return Vec::new();
        };

        match value.try_into::<Vec<I::Id>>() {
            Ok(ids) => ids,
            Err(error) => {
                tracing::warn!("Ignoring unreadable favorites under {}: {}", key, error);
                Vec::new()
            }
        }
    }

    fn set_is_favorite<I>(&self, is_favorite: bool, item: &I) -> FavoritesResult<()>
    where
        I: Favoritable,
        I::Id: Serialize + DeserializeOwned,
    {
        let id = item.id();
        let mut favorites = self.get_favorites::<I>();
        let present = favorites.contains(id);

        match (is_favorite, present) {
            (true, false) => favorites.push(id.clone()),
            (false, true) => favorites.retain(|favorite| favorite != id),
            _ => return Ok(()),
        }

        let key = favorites_key::<I>();
        tracing::debug!("{} favorites under {}", favorites.len(), key);
        self.store.set(&key, Value::try_from(favorites)?)
    }
}
