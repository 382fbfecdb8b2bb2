//! Paged presentation: one card per page, swiped left and right.
//!
//! Unlike the stack, paging never reorders the deck. A drag only moves the
//! current page index, and the edges are hard stops.

use crate::deck::SharedDeck;
use crate::error::{DeckError, DeckResult};
use crate::events::DeckEvent;
use crate::item::DeckItem;
use crate::math::Vec2;

/// A committed page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    /// Page shown before the drag.
    pub from: usize,
    /// Page shown now.
    pub to: usize,
}

/// A deck rendered as horizontal pages.
#[derive(Debug, Clone)]
pub struct PagedDeck<T: DeckItem> {
    deck: SharedDeck<T>,
    page_width: f32,
    /// Fraction of the page width a drag must exceed to change page.
    change_fraction: f32,
    current: usize,
    drag_offset: f32,
}

impl<T: DeckItem> PagedDeck<T> {
    /// Default fraction of the page width that commits a page change.
    pub const DEFAULT_CHANGE_FRACTION: f32 = 0.25;

    /// Creates a paged presentation showing the first page.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] for a non-positive page width.
    pub fn new(deck: SharedDeck<T>, page_width: f32) -> DeckResult<Self> {
        if !page_width.is_finite() || page_width <= 0.0 {
            return Err(DeckError::InvalidConfig {
                field: "page_width",
                reason: "must be a positive finite number",
            });
        }
        Ok(Self {
            deck,
            page_width,
            change_fraction: Self::DEFAULT_CHANGE_FRACTION,
            current: 0,
            drag_offset: 0.0,
        })
    }

    /// Sets the fraction of the page width that commits a page change.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] unless `fraction` is in `(0, 1]`.
    pub fn with_change_fraction(mut self, fraction: f32) -> DeckResult<Self> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(DeckError::InvalidConfig {
                field: "change_fraction",
                reason: "must be in (0, 1]",
            });
        }
        self.change_fraction = fraction;
        Ok(self)
    }

    /// The presented deck.
    #[must_use]
    pub fn deck(&self) -> &SharedDeck<T> {
        &self.deck
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.deck.len()
    }

    /// Index of the page currently shown, clamped to the deck length.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current.min(self.page_count().saturating_sub(1))
    }

    /// Live drag offset of the current page.
    #[must_use]
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    /// Horizontal position of page `index` relative to the viewport.
    #[must_use]
    pub fn page_offset(&self, index: usize) -> f32 {
        let distance = index as f32 - self.current_page() as f32;
        distance * self.page_width + self.drag_offset
    }

    /// Host drag-changed event. Only the horizontal component is used.
    pub fn drag_changed(&mut self, translation: Vec2) {
        self.drag_offset = translation.x;
    }

    /// Host drag-ended event.
    ///
    /// Moves one page towards the drag when its distance exceeds the change
    /// fraction, stopping at the first and last page. Publishes
    /// [`DeckEvent::PageChanged`] when the page changed.
    pub fn drag_ended(&mut self) -> Option<PageChange> {
        let offset = std::mem::take(&mut self.drag_offset);
        let from = self.current_page();
        let threshold = self.page_width * self.change_fraction;

        let to = if offset < -threshold {
            (from + 1).min(self.page_count().saturating_sub(1))
        } else if offset > threshold {
            from.saturating_sub(1)
        } else {
            from
        };

        self.current = to;
        if to == from {
            return None;
        }

        tracing::debug!("Page changed from {} to {}", from, to);
        self.deck.events().publish(&DeckEvent::PageChanged { from, to });
        Some(PageChange { from, to })
    }

    /// Shows page `index`, clamped to the last page.
    pub fn set_page(&mut self, index: usize) -> Option<PageChange> {
        let from = self.current_page();
        let to = index.min(self.page_count().saturating_sub(1));
        self.current = to;
        self.drag_offset = 0.0;
        if to == from {
            return None;
        }
        self.deck.events().publish(&DeckEvent::PageChanged { from, to });
        Some(PageChange { from, to })
    }
}

impl<T: DeckItem + Clone> PagedDeck<T> {
    /// The item on the current page.
    #[must_use]
    pub fn current_item(&self) -> Option<T> {
        self.deck.get(self.current_page())
    }
}
