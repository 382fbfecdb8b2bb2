//! Shared, observable item list.
//!
//! The host, the controller and the shuffle animator all work on the same
//! [`SharedDeck`]. Cloning it is cheap and every clone sees the same list
//! and the same event bus.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::controller::{DeckController, DragUpdate, Swipe};
use crate::error::DeckResult;
use crate::events::{DeckEvent, EventBus, EventReceiver};
use crate::item::DeckItem;
use crate::math::Vec2;
use crate::ordering::ensure_unique_ids;

/// Ordered item list plus the event bus that reports changes to it.
pub struct SharedDeck<T: DeckItem> {
    items: Arc<RwLock<Vec<T>>>,
    events: Arc<EventBus<DeckEvent<T::Id>>>,
}

impl<T: DeckItem> SharedDeck<T> {
    /// Wraps `items` without checking identities.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            events: Arc::new(EventBus::default()),
        }
    }

    /// Wraps `items` after checking that every id is unique.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::DuplicateItemId`] for the first id seen twice.
    pub fn try_new(items: Vec<T>) -> DeckResult<Self> {
        ensure_unique_ids(&items)?;
        Ok(Self::new(items))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns true if the deck has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Item ids in order.
    #[must_use]
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.read().iter().map(|item| item.id().clone()).collect()
    }

    /// Runs `f` with shared access to the list.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.read())
    }

    /// Runs `f` with exclusive access to the list.
    ///
    /// Publishes [`DeckEvent::Reordered`] if the id sequence changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let (result, changed) = {
            let mut items = self.items.write();
            let before: Vec<T::Id> = items.iter().map(|item| item.id().clone()).collect();
            let result = f(&mut items);
            let changed = !items.iter().map(DeckItem::id).eq(before.iter());
            (result, changed)
        };

        if changed {
            self.events.publish(&DeckEvent::Reordered);
        }
        result
    }

    /// Replaces every item.
    pub fn replace(&self, items: Vec<T>) {
        self.update(|current| *current = items);
    }

    /// Registers an event subscriber.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver<DeckEvent<T::Id>> {
        self.events.subscribe()
    }

    /// The deck's event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus<DeckEvent<T::Id>> {
        &self.events
    }

    /// Feeds one drag tick through `controller` and publishes any reorder.
    pub fn drag_changed(
        &self,
        controller: &mut DeckController<T>,
        item: &T,
        translation: Vec2,
    ) -> DragUpdate {
        let update = {
            let mut items = self.items.write();
            controller.drag_changed(&mut items, item, translation)
        };

        if let DragUpdate::Tracking { reordered: true, .. } = update {
            self.events.publish(&DeckEvent::Reordered);
        }
        update
    }

    /// Ends the drag tracked by `controller` and publishes a committed swipe.
    ///
    /// Swipe callbacks run without the list lock held, so they may mutate
    /// the deck.
    pub fn drag_ended(&self, controller: &mut DeckController<T>) -> Option<Swipe<T::Id>>
    where
        T: Clone,
    {
        let tracked = controller.active_item_id().cloned().and_then(|id| {
            self.items
                .read()
                .iter()
                .find(|item| *item.id() == id)
                .cloned()
        });

        let swipe = controller.drag_ended(tracked.as_slice())?;
        self.events.publish(&DeckEvent::Swiped {
            edge: swipe.edge,
            item_id: swipe.item_id.clone(),
        });
        Some(swipe)
    }
}

impl<T: DeckItem + Clone> SharedDeck<T> {
    /// Copies the current list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Copies the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }
}

impl<T: DeckItem> Clone for SharedDeck<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: DeckItem> std::fmt::Debug for SharedDeck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDeck")
            .field("len", &self.len())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeckConfig;
    use crate::controller::{SwipeActions, SwipeEdge};
    use crate::error::DeckError;
    use crate::ordering::tests::{cards, Card};
    use crate::ordering::ItemOrdering;

    #[test]
    fn test_try_new_rejects_duplicates() {
        let result = SharedDeck::try_new(vec![Card(1), Card(2), Card(1)]);
        assert!(matches!(result, Err(DeckError::DuplicateItemId(_))));
        assert!(SharedDeck::try_new(cards(3)).is_ok());
    }

    #[test]
    fn test_update_publishes_only_on_reorder() {
        let deck = SharedDeck::new(cards(3));
        let events = deck.subscribe();

        deck.update(|items| items.move_to_front(&Card(0)));
        assert!(!events.has_events());

        deck.update(|items| items.move_first_to_back());
        assert_eq!(events.drain(), vec![DeckEvent::Reordered]);
        assert_eq!(deck.ids(), vec![1, 2, 0]);
    }

    #[test]
    fn test_clones_share_state() {
        let deck = SharedDeck::new(cards(3));
        let other = deck.clone();

        other.replace(cards(5));

        assert_eq!(deck.len(), 5);
        assert_eq!(deck.get(4), Some(Card(4)));
    }

    #[test]
    fn test_drag_publishes_reorder_and_swipe() {
        let deck = SharedDeck::new(cards(3));
        let events = deck.subscribe();
        let mut controller = DeckController::new(DeckConfig::default()).unwrap();

        deck.drag_changed(&mut controller, &Card(0), Vec2::new(-150.0, 0.0));
        let swipe = deck.drag_ended(&mut controller);

        assert_eq!(swipe.map(|s| s.edge), Some(SwipeEdge::Leading));
        assert_eq!(
            events.drain(),
            vec![
                DeckEvent::Reordered,
                DeckEvent::Swiped { edge: SwipeEdge::Leading, item_id: 0 },
            ]
        );
    }

    #[test]
    fn test_swipe_callback_may_mutate_deck() {
        let deck = SharedDeck::new(cards(3));
        let handle = deck.clone();
        let mut controller = DeckController::new(DeckConfig::default())
            .unwrap()
            .with_actions(SwipeActions::new().on_swipe(move |_, card: &Card| {
                let id = card.0;
                handle.update(|items| items.retain(|c| c.0 != id));
            }));

        deck.drag_changed(&mut controller, &Card(0), Vec2::new(150.0, 0.0));
        deck.drag_ended(&mut controller);

        assert_eq!(deck.ids(), vec![1, 2]);
    }
}
