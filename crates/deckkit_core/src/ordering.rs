//! Reorder primitives for identifiable item lists.
//!
//! All operations look items up by id, mutate in place, and never change
//! the number of items or their identity. An item that is not in the list
//! is a no-op, since the list and a gesture can race benignly.
//!
//! Duplicate ids are not supported by these primitives: the first match
//! wins. Use [`ensure_unique_ids`] at the boundary where items enter a deck.

use std::collections::HashSet;

use crate::error::{DeckError, DeckResult};
use crate::item::DeckItem;

/// Id-based reordering for item lists.
pub trait ItemOrdering<T: DeckItem> {
    /// Returns the first position whose id matches `item`.
    fn index_of(&self, item: &T) -> Option<usize>;

    /// Moves `item` to the end of the list.
    ///
    /// Returns true if the order changed.
    fn move_to_back(&mut self, item: &T) -> bool;

    /// Moves `item` to the start of the list.
    ///
    /// Returns true if the order changed.
    fn move_to_front(&mut self, item: &T) -> bool;

    /// Moves the first item to the end of the list.
    fn move_first_to_back(&mut self) -> bool;

    /// Moves the last item to the start of the list.
    fn move_last_to_front(&mut self) -> bool;
}

impl<T: DeckItem> ItemOrdering<T> for Vec<T> {
    fn index_of(&self, item: &T) -> Option<usize> {
        let id = item.id();
        self.iter().position(|candidate| candidate.id() == id)
    }

    fn move_to_back(&mut self, item: &T) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        if index + 1 == self.len() {
            return false;
        }
        let moved = self.remove(index);
        self.push(moved);
        true
    }

    fn move_to_front(&mut self, item: &T) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let moved = self.remove(index);
        self.insert(0, moved);
        true
    }

    fn move_first_to_back(&mut self) -> bool {
        if self.len() < 2 {
            return false;
        }
        self.rotate_left(1);
        true
    }

    fn move_last_to_front(&mut self) -> bool {
        if self.len() < 2 {
            return false;
        }
        self.rotate_right(1);
        true
    }
}

/// Rejects item lists where two items share an id.
///
/// # Errors
///
/// Returns [`DeckError::DuplicateItemId`] naming the first repeated id.
pub fn ensure_unique_ids<T: DeckItem>(items: &[T]) -> DeckResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = item.id();
        if !seen.insert(id) {
            return Err(DeckError::DuplicateItemId(format!("{id:?}")));
        }
    }
    Ok(())
}
