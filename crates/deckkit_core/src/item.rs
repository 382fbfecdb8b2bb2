//! Item identity.

use std::fmt::Debug;
use std::hash::Hash;

/// A value that can be presented as one card in a deck.
///
/// Decks never compare items structurally. Every reorder, lookup and
/// visibility check goes through [`DeckItem::id`], so two items with the
/// same id are the same card as far as the deck is concerned.
///
/// Lookups run on every drag tick, so `id` hands out a borrow. Ids are only
/// cloned when the deck has to keep one, such as the tracked card or an
/// event payload.
pub trait DeckItem {
    /// Stable unique identifier type.
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the item's identifier.
    fn id(&self) -> &Self::Id;
}
