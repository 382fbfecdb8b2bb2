//! Observable favorite state for one item type.
//!
//! The context caches the favorite ids of `I` read through a
//! [`FavoriteService`] and keeps the "show only favorites" flag in a
//! settings store. Every change is broadcast on an [`EventBus`] so views can
//! refresh without polling.

use std::marker::PhantomData;

use deckkit_core::{EventBus, EventReceiver};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use toml::Value;

use crate::error::FavoritesResult;
use crate::service::{Favoritable, FavoriteService, StoreFavoriteService};
use crate::store::KeyValueStore;

/// Storage key of the "show only favorites" flag.
pub const SHOW_ONLY_FAVORITES_KEY: &str = "deckkit.showonlyfavorites";

/// Change notifications from a [`FavoriteContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteEvent<Id> {
    /// An item was marked or unmarked.
    FavoriteChanged {
        /// The changed item.
        item_id: Id,
        /// Its new state.
        is_favorite: bool,
    },
    /// The "show only favorites" flag changed.
    ShowOnlyFavoritesChanged(bool),
}

/// Favorite state of every `I`.
///
/// Favorite ids come from any [`FavoriteService`]; the "show only
/// favorites" flag lives in a separate settings store.
pub struct FavoriteContext<I, F, S>
where
    I: Favoritable,
    F: FavoriteService,
    S: KeyValueStore,
{
    service: F,
    settings: S,
    favorites: RwLock<Vec<I::Id>>,
    show_only_favorites: RwLock<bool>,
    events: EventBus<FavoriteEvent<I::Id>>,
    _item: PhantomData<fn() -> I>,
}

impl<I, S> FavoriteContext<I, StoreFavoriteService<S>, S>
where
    I: Favoritable,
    I::Id: Serialize + DeserializeOwned,
    S: KeyValueStore + Clone,
{
    /// Keeps both the favorites and the flag in `store`.
    #[must_use]
    pub fn from_store(store: S) -> Self {
        Self::new(StoreFavoriteService::new(store.clone()), store)
    }
}

impl<I, F, S> FavoriteContext<I, F, S>
where
    I: Favoritable,
    I::Id: Serialize + DeserializeOwned,
    F: FavoriteService,
    S: KeyValueStore,
{
    /// Loads the favorites from `service` and the persisted flag from
    /// `settings`.
    #[must_use]
    pub fn new(service: F, settings: S) -> Self {
        let favorites = service.get_favorites::<I>();
        let show_only_favorites = match settings.get(SHOW_ONLY_FAVORITES_KEY) {
            Some(Value::Boolean(flag)) => flag,
            Some(other) => {
                tracing::warn!(
                    "Ignoring non-boolean {} value: {}",
                    SHOW_ONLY_FAVORITES_KEY,
                    other
                );
                false
            }
            None => false,
        };

        Self {
            service,
            settings,
            favorites: RwLock::new(favorites),
            show_only_favorites: RwLock::new(show_only_favorites),
            events: EventBus::default(),
            _item: PhantomData,
        }
    }

    /// Cached favorite ids, in the order they were marked.
    #[must_use]
    pub fn favorites(&self) -> Vec<I::Id> {
        self.favorites.read().clone()
    }

    /// Returns true if `item` is a favorite.
    #[must_use]
    pub fn is_favorite(&self, item: &I) -> bool {
        self.favorites.read().contains(item.id())
    }

    /// Marks or unmarks `item` as a favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot store the change. The cache
    /// is left untouched in that case.
    pub fn set_is_favorite(&self, is_favorite: bool, item: &I) -> FavoritesResult<()> {
        if self.is_favorite(item) == is_favorite {
            return Ok(());
        }
        self.service.set_is_favorite(is_favorite, item)?;
        *self.favorites.write() = self.service.get_favorites::<I>();

        self.events.publish(&FavoriteEvent::FavoriteChanged {
            item_id: item.id().clone(),
            is_favorite,
        });
        Ok(())
    }

    /// Flips the favorite state of `item` and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot store the change.
    pub fn toggle_is_favorite(&self, item: &I) -> FavoritesResult<bool> {
        let is_favorite = !self.is_favorite(item);
        self.set_is_favorite(is_favorite, item)?;
        Ok(is_favorite)
    }

    /// Whether views should only list favorites.
    #[must_use]
    pub fn show_only_favorites(&self) -> bool {
        *self.show_only_favorites.read()
    }

    /// Sets and persists the "show only favorites" flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot write the flag.
    pub fn set_show_only_favorites(&self, show: bool) -> FavoritesResult<()> {
        if self.show_only_favorites() == show {
            return Ok(());
        }
        self.settings
            .set(SHOW_ONLY_FAVORITES_KEY, Value::Boolean(show))?;
        *self.show_only_favorites.write() = show;

        tracing::debug!("Show only favorites: {}", show);
        self.events
            .publish(&FavoriteEvent::ShowOnlyFavoritesChanged(show));
        Ok(())
    }

    /// The items a view should list: every item, or only the favorites when
    /// the flag is set. Order is preserved.
    #[must_use]
    pub fn filter<'a>(&self, items: &'a [I]) -> Vec<&'a I> {
        if !self.show_only_favorites() {
            return items.iter().collect();
        }
        let favorites = self.favorites.read();
        items
            .iter()
            .filter(|item| favorites.contains(item.id()))
            .collect()
    }

    /// Registers an event subscriber.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver<FavoriteEvent<I::Id>> {
        self.events.subscribe()
    }

    /// The underlying service.
    #[must_use]
    pub fn service(&self) -> &F {
        &self.service
    }
}

impl<I, F, S> std::fmt::Debug for FavoriteContext<I, F, S>
where
    I: Favoritable,
    F: FavoriteService,
    S: KeyValueStore,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteContext")
            .field("favorites", &self.favorites.read())
            .field("show_only_favorites", &self.show_only_favorites.read())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use deckkit_core::DeckItem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Place(u32);

    impl DeckItem for Place {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.0
        }
    }

    impl Favoritable for Place {}

    type MemoryContext =
        FavoriteContext<Place, StoreFavoriteService<Arc<MemoryStore>>, Arc<MemoryStore>>;

    fn context() -> MemoryContext {
        FavoriteContext::from_store(Arc::new(MemoryStore::new()))
    }

    fn places() -> Vec<Place> {
        (1..=4).map(Place).collect()
    }

    /// Store-backed service that counts writes.
    #[derive(Default)]
    struct CountingService {
        inner: StoreFavoriteService<MemoryStore>,
        writes: AtomicUsize,
    }

    impl FavoriteService for CountingService {
        fn get_favorites<I>(&self) -> Vec<I::Id>
        where
            I: Favoritable,
            I::Id: Serialize + DeserializeOwned,
        {
            self.inner.get_favorites::<I>()
        }

        fn set_is_favorite<I>(&self, is_favorite: bool, item: &I) -> FavoritesResult<()>
        where
            I: Favoritable,
            I::Id: Serialize + DeserializeOwned,
        {
            self.writes.fetch_add(1, Ordering::Relaxed);
            self.inner.set_is_favorite(is_favorite, item)
        }
    }

    #[test]
    fn test_toggle_updates_cache_and_events() {
        let context = context();
        let events = context.subscribe();

        assert!(context.toggle_is_favorite(&Place(2)).unwrap());
        assert_eq!(context.favorites(), vec![2]);
        assert!(!context.toggle_is_favorite(&Place(2)).unwrap());
        assert!(context.favorites().is_empty());

        assert_eq!(
            events.drain(),
            vec![
                FavoriteEvent::FavoriteChanged { item_id: 2, is_favorite: true },
                FavoriteEvent::FavoriteChanged { item_id: 2, is_favorite: false },
            ]
        );
    }

    #[test]
    fn test_unchanged_state_publishes_nothing() {
        let context = context();
        let events = context.subscribe();

        context.set_is_favorite(false, &Place(1)).unwrap();
        context.set_show_only_favorites(false).unwrap();

        assert!(!events.has_events());
    }

    #[test]
    fn test_filter_honors_flag() {
        let context = context();
        let items = places();
        context.set_is_favorite(true, &Place(3)).unwrap();
        context.set_is_favorite(true, &Place(1)).unwrap();

        assert_eq!(context.filter(&items).len(), 4);

        context.set_show_only_favorites(true).unwrap();
        let shown: Vec<u32> = context.filter(&items).iter().map(|p| p.0).collect();
        assert_eq!(shown, vec![1, 3]);
    }

    #[test]
    fn test_state_is_reloaded_from_store() {
        let store = Arc::new(MemoryStore::new());
        {
            let context: MemoryContext = FavoriteContext::from_store(Arc::clone(&store));
            context.set_is_favorite(true, &Place(4)).unwrap();
            context.set_show_only_favorites(true).unwrap();
        }

        let reloaded: MemoryContext = FavoriteContext::from_store(store);

        assert!(reloaded.is_favorite(&Place(4)));
        assert!(reloaded.show_only_favorites());
    }

    #[test]
    fn test_custom_service_and_separate_settings() {
        let settings = Arc::new(MemoryStore::new());
        let context: FavoriteContext<Place, CountingService, _> =
            FavoriteContext::new(CountingService::default(), Arc::clone(&settings));

        context.toggle_is_favorite(&Place(2)).unwrap();
        context.set_is_favorite(true, &Place(2)).unwrap();
        context.set_show_only_favorites(true).unwrap();

        assert_eq!(context.service().writes.load(Ordering::Relaxed), 1);
        assert_eq!(context.service().get_favorites::<Place>(), vec![2]);
        assert_eq!(settings.get(SHOW_ONLY_FAVORITES_KEY), Some(Value::Boolean(true)));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_non_boolean_flag_defaults_to_false() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(SHOW_ONLY_FAVORITES_KEY, Value::String("yes".into()))
            .unwrap();

        let context: MemoryContext = FavoriteContext::from_store(store);

        assert!(!context.show_only_favorites());
    }
}
