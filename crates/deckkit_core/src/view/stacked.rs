//! Swipeable stack presentation.

use std::sync::Arc;

use crate::controller::{DeckController, DragUpdate, Swipe};
use crate::deck::SharedDeck;
use crate::item::DeckItem;
use crate::layout::visible_items;
use crate::math::{ItemTransform, Vec2};
use crate::shuffle::{ShuffleAnimator, ShuffleOutcome};

/// Transform of one visible card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFrame<Id> {
    /// The rendered item.
    pub item_id: Id,
    /// Where and how to draw it.
    pub transform: ItemTransform,
}

/// A deck rendered as a stack with the top card on top.
///
/// Owns the interaction controller and shares the deck and the shuffle
/// animator with the host.
pub struct StackedDeck<T: DeckItem> {
    deck: SharedDeck<T>,
    controller: DeckController<T>,
    shuffler: Arc<ShuffleAnimator>,
}

impl<T: DeckItem + Clone> StackedDeck<T> {
    /// Creates a stacked presentation.
    #[must_use]
    pub fn new(
        deck: SharedDeck<T>,
        controller: DeckController<T>,
        shuffler: Arc<ShuffleAnimator>,
    ) -> Self {
        Self {
            deck,
            controller,
            shuffler,
        }
    }

    /// The presented deck.
    #[must_use]
    pub fn deck(&self) -> &SharedDeck<T> {
        &self.deck
    }

    /// The interaction controller.
    #[must_use]
    pub fn controller(&self) -> &DeckController<T> {
        &self.controller
    }

    /// Mutable access to the interaction controller.
    pub fn controller_mut(&mut self) -> &mut DeckController<T> {
        &mut self.controller
    }

    /// The shuffle animator.
    #[must_use]
    pub fn shuffler(&self) -> &Arc<ShuffleAnimator> {
        &self.shuffler
    }

    /// Host drag-changed event for `item`.
    pub fn drag_changed(&mut self, item: &T, translation: Vec2) -> DragUpdate {
        self.deck.drag_changed(&mut self.controller, item, translation)
    }

    /// Host drag-ended event.
    pub fn drag_ended(&mut self) -> Option<Swipe<T::Id>> {
        self.deck.drag_ended(&mut self.controller)
    }

    /// Host drag-cancelled event.
    pub fn cancel_drag(&mut self) {
        self.controller.cancel_drag();
    }

    /// Shuffles the deck `times` times.
    pub async fn shuffle(&self, times: usize) -> ShuffleOutcome {
        self.shuffler.shuffle(&self.deck, times).await
    }

    /// Computes this frame's transforms for the visible cards, top card first.
    #[must_use]
    pub fn frame(&self) -> Vec<CardFrame<T::Id>> {
        let is_shuffling = self.shuffler.is_shuffling();

        self.deck.read(|items| {
            let visible = visible_items(items, self.controller.config());
            visible
                .iter()
                .filter_map(|item| {
                    let mut transform = self.controller.transform(*item, &visible, is_shuffling)?;
                    if let Some(offset) = self.shuffler.offset_for(*item, items) {
                        transform.offset = transform.offset + offset.translation();
                        transform.rotation_degrees += offset.angle_degrees;
                    }
                    Some(CardFrame {
                        item_id: item.id().clone(),
                        transform,
                    })
                })
                .collect()
        })
    }
}

impl<T: DeckItem> std::fmt::Debug for StackedDeck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackedDeck")
            .field("deck", &self.deck)
            .field("controller", &self.controller)
            .field("shuffling", &self.shuffler.is_shuffling())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeckConfig, ShuffleConfig};
    use crate::ordering::tests::{cards, Card};
    use std::time::Duration;

    fn stacked(count: u32, config: DeckConfig) -> StackedDeck<Card> {
        StackedDeck::new(
            SharedDeck::new(cards(count)),
            DeckController::new(config).unwrap(),
            Arc::new(ShuffleAnimator::with_seed(ShuffleConfig::default(), 3).unwrap()),
        )
    }

    #[test]
    fn test_frame_covers_visible_subset() {
        let view = stacked(12, DeckConfig::default().with_item_display_count(4));

        let frame = view.frame();
        let ids: Vec<u32> = frame.iter().map(|f| f.item_id).collect();

        assert_eq!(ids, vec![0, 1, 2, 11]);
        assert!(frame.windows(2).all(|w| w[0].transform.z_order > w[1].transform.z_order));
    }

    #[test]
    fn test_frame_follows_drag() {
        let mut view = stacked(3, DeckConfig::default());

        view.drag_changed(&Card(0), Vec2::new(30.0, 5.0));
        let frame = view.frame();

        assert_eq!(frame[0].item_id, 0);
        assert_eq!(frame[0].transform.offset, Vec2::new(30.0, 5.0));
        assert_eq!(frame[1].transform.offset, Vec2::ZERO);

        view.cancel_drag();
        assert_eq!(view.frame()[0].transform.offset, Vec2::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_during_shuffle() {
        let view = stacked(6, DeckConfig::default());

        let probe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            view.frame()
        };
        let (outcome, frame) = tokio::join!(view.shuffle(2), probe);

        assert_eq!(outcome, ShuffleOutcome::Completed);
        assert_eq!(frame.len(), 6);
        assert!(frame.iter().all(|f| f.transform.vertical_offset.abs() < f32::EPSILON));
        assert!(frame.iter().any(|f| f.transform.offset != Vec2::ZERO));

        let settled = view.frame();
        assert!(settled.iter().all(|f| f.transform.offset == Vec2::ZERO));
    }
}
