//! Stack layout policy.
//!
//! Pure functions over a [`DeckConfig`] and an ordered item list. Depth is
//! an item's position inside the visible subset (0 = top card), never its
//! position in the full list.

use crate::config::DeckConfig;
use crate::item::DeckItem;

/// Returns the items rendered with stacking offsets, top card first.
///
/// Takes the first `item_display_count` items. When
/// `always_show_last_item` is set and the true last item is not among
/// them, it replaces the last slot of that prefix, so the subset keeps a
/// constant size and the back of the stack stays visually stable. A single
/// slot always holds the top card.
#[must_use]
pub fn visible_items<'a, T: DeckItem>(items: &'a [T], config: &DeckConfig) -> Vec<&'a T> {
    let count = config.item_display_count.min(items.len());
    let mut visible: Vec<&T> = items[..count].iter().collect();

    if config.always_show_last_item && count >= 2 && items.len() > count {
        if let Some(last) = items.last() {
            visible[count - 1] = last;
        }
    }

    visible
}

/// Returns the depth of `item` inside `visible`.
#[must_use]
pub fn depth_index<T: DeckItem>(item: &T, visible: &[&T]) -> Option<usize> {
    let id = item.id();
    visible.iter().position(|candidate| candidate.id() == id)
}

/// Scale of a card at `depth`.
///
/// Not clamped: keep `item_display_count * scale_offset` below one for
/// sensible visuals.
#[must_use]
pub fn scale_at_depth(depth: usize, config: &DeckConfig) -> f32 {
    1.0 - depth as f32 * config.scale_offset
}

/// Stacking displacement of a card at `depth`.
#[must_use]
pub fn vertical_offset_at_depth(depth: usize, config: &DeckConfig) -> f32 {
    depth as f32 * config.vertical_offset * config.direction.multiplier()
}

/// Draw priority of a card at `depth`; the top card gets the highest.
#[must_use]
pub fn z_order(depth: usize, visible_count: usize) -> f32 {
    visible_count as f32 - depth as f32
}
