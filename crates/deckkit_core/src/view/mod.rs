//! Render-ready presentations of a [`crate::SharedDeck`].
//!
//! - [`StackedDeck`]: the swipeable stack.
//! - [`HorizontalDeck`]: a scrolling row of cards.
//! - [`PagedDeck`]: one card per page, swiped left and right.

mod horizontal;
mod paged;
mod stacked;

pub use horizontal::{HorizontalDeck, RowFrame};
pub use paged::{PageChange, PagedDeck};
pub use stacked::{CardFrame, StackedDeck};
