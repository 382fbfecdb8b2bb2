//! Horizontal row presentation.
//!
//! Every card gets a slot in one left-to-right row. Only the slots that
//! intersect the scroll viewport are returned, so hosts can build card views
//! lazily.

use crate::deck::SharedDeck;
use crate::error::{DeckError, DeckResult};
use crate::item::DeckItem;
use crate::math::Rect;

/// Slot of one card in the row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame<Id> {
    /// The rendered item.
    pub item_id: Id,
    /// Slot in content coordinates.
    pub rect: Rect,
}

/// A deck rendered as a scrolling row of equally sized cards.
#[derive(Debug, Clone)]
pub struct HorizontalDeck<T: DeckItem> {
    deck: SharedDeck<T>,
    /// Card width.
    card_width: f32,
    /// Card height.
    card_height: f32,
    /// Gap between cards.
    gap: f32,
    /// Padding around the row.
    padding: f32,
}

impl<T: DeckItem> HorizontalDeck<T> {
    /// Default gap between cards.
    pub const DEFAULT_GAP: f32 = 8.0;

    /// Creates a row of `card_width` x `card_height` cards.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] for a non-positive card size.
    pub fn new(deck: SharedDeck<T>, card_width: f32, card_height: f32) -> DeckResult<Self> {
        if !card_width.is_finite() || card_width <= 0.0 {
            return Err(DeckError::InvalidConfig {
                field: "card_width",
                reason: "must be a positive finite number",
            });
        }
        if !card_height.is_finite() || card_height <= 0.0 {
            return Err(DeckError::InvalidConfig {
                field: "card_height",
                reason: "must be a positive finite number",
            });
        }
        Ok(Self {
            deck,
            card_width,
            card_height,
            gap: Self::DEFAULT_GAP,
            padding: 0.0,
        })
    }

    /// Sets the gap between cards. Negative values are treated as zero.
    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Sets padding around the row. Negative values are treated as zero.
    #[must_use]
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// The presented deck.
    #[must_use]
    pub fn deck(&self) -> &SharedDeck<T> {
        &self.deck
    }

    /// Total scrollable width for `count` cards.
    #[must_use]
    pub fn content_width(&self, count: usize) -> f32 {
        if count == 0 {
            return self.padding * 2.0;
        }
        let cards = self.card_width * count as f32;
        let gaps = self.gap * (count - 1) as f32;
        cards + gaps + self.padding * 2.0
    }

    /// Slot of the card at `index`.
    #[must_use]
    pub fn slot(&self, index: usize) -> Rect {
        let x = self.padding + index as f32 * (self.card_width + self.gap);
        Rect::new(x, self.padding, self.card_width, self.card_height)
    }

    /// Index range of the cards that intersect `viewport`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_range(&self, count: usize, viewport: Rect) -> std::ops::Range<usize> {
        let stride = self.card_width + self.gap;
        let first = ((viewport.x - self.padding - self.card_width) / stride)
            .floor()
            .max(0.0) as usize;

        let mut range = first.min(count)..first.min(count);
        for index in first..count {
            let slot = self.slot(index);
            if slot.x >= viewport.right() {
                break;
            }
            if slot.intersects(&viewport) {
                if range.is_empty() {
                    range.start = index;
                }
                range.end = index + 1;
            }
        }
        range
    }

    /// Slots of the cards visible in `viewport`, left to right.
    #[must_use]
    pub fn frames(&self, viewport: Rect) -> Vec<RowFrame<T::Id>> {
        self.deck.read(|items| {
            let range = self.visible_range(items.len(), viewport);
            items[range.clone()]
                .iter()
                .zip(range)
                .map(|(item, index)| RowFrame {
                    item_id: item.id().clone(),
                    rect: self.slot(index),
                })
                .collect()
        })
    }
}
