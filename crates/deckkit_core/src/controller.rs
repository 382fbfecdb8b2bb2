//! # Deck Interaction Controller
//!
//! The state machine behind a swipeable stack.
//!
//! ## States
//!
//! - **Idle**: no card is tracked.
//! - **Dragging**: one card follows the pointer. Drag events for any other
//!   card are ignored until the drag ends, which is what makes only the top
//!   card respond.
//!
//! ## Eager reorder
//!
//! Every drag tick reorders the backing list: past threshold the card is
//! moved to the back, under threshold it is moved to the front again. The
//! host sees the card "peel off" the stack while it is still being dragged,
//! and dragging back under threshold restores the original order.
//!
//! ```text
//!            drag_changed(item)                 drag_ended
//!   ┌──────┐ ─────────────────> ┌──────────┐ ──────────────> ┌──────┐
//!   │ Idle │                    │ Dragging │  past? → edge   │ Idle │
//!   └──────┘ <───────────────── └──────────┘  callback       └──────┘
//!               cancel_drag
//! ```

use crate::config::DeckConfig;
use crate::error::DeckResult;
use crate::item::DeckItem;
use crate::layout::{depth_index, scale_at_depth, vertical_offset_at_depth, z_order};
use crate::math::{ItemTransform, Vec2};
use crate::ordering::ItemOrdering;

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeEdge {
    /// Swiped towards the leading (left) edge.
    Leading,
    /// Swiped towards the trailing (right) edge.
    Trailing,
    /// Swiped towards the top edge.
    Top,
    /// Swiped towards the bottom edge.
    Bottom,
}

impl SwipeEdge {
    /// Classifies a drag translation, or returns `None` if it is not past
    /// either threshold.
    ///
    /// The horizontal threshold is checked first, so a diagonal drag past
    /// both thresholds counts as a horizontal swipe.
    #[must_use]
    pub fn classify(translation: Vec2, config: &DeckConfig) -> Option<Self> {
        if translation.x.abs() > config.horizontal_drag_threshold {
            return Some(if translation.x > 0.0 { Self::Trailing } else { Self::Leading });
        }
        if translation.y.abs() > config.vertical_drag_threshold {
            return Some(if translation.y > 0.0 { Self::Bottom } else { Self::Top });
        }
        None
    }
}

/// Returns true if `translation` is beyond either drag threshold.
#[must_use]
pub fn is_past_threshold(translation: Vec2, config: &DeckConfig) -> bool {
    translation.x.abs() > config.horizontal_drag_threshold
        || translation.y.abs() > config.vertical_drag_threshold
}

/// Gesture tracking state.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState<Id> {
    /// No card is being dragged.
    Idle,
    /// A card follows the pointer.
    Dragging {
        /// The tracked card.
        item_id: Id,
        /// Last reported drag translation.
        translation: Vec2,
    },
}

impl<Id> Default for InteractionState<Id> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Result of feeding one drag tick to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// The event was for a card other than the tracked one.
    Ignored,
    /// The tracked card moved.
    Tracking {
        /// The translation is beyond a threshold.
        past_threshold: bool,
        /// The backing list was reordered by this tick.
        reordered: bool,
    },
}

/// A committed swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swipe<Id> {
    /// Edge the card was swiped towards.
    pub edge: SwipeEdge,
    /// The swiped card.
    pub item_id: Id,
}

type SwipeHandler<T> = Box<dyn FnMut(SwipeEdge, &T) + Send>;
type EdgeHandler<T> = Box<dyn FnMut(&T) + Send>;

/// Host callbacks for committed swipes.
///
/// A single `(edge, item)` handler, per-edge handlers, or both. When both
/// are set the single handler runs first.
pub struct SwipeActions<T> {
    on_swipe: Option<SwipeHandler<T>>,
    leading: Option<EdgeHandler<T>>,
    trailing: Option<EdgeHandler<T>>,
    top: Option<EdgeHandler<T>>,
    bottom: Option<EdgeHandler<T>>,
}

impl<T> SwipeActions<T> {
    /// Creates an empty set of actions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_swipe: None,
            leading: None,
            trailing: None,
            top: None,
            bottom: None,
        }
    }

    /// Sets the handler called for every committed swipe.
    #[must_use]
    pub fn on_swipe(mut self, handler: impl FnMut(SwipeEdge, &T) + Send + 'static) -> Self {
        self.on_swipe = Some(Box::new(handler));
        self
    }

    /// Sets the handler for swipes towards the leading edge.
    #[must_use]
    pub fn on_leading(mut self, handler: impl FnMut(&T) + Send + 'static) -> Self {
        self.leading = Some(Box::new(handler));
        self
    }

    /// Sets the handler for swipes towards the trailing edge.
    #[must_use]
    pub fn on_trailing(mut self, handler: impl FnMut(&T) + Send + 'static) -> Self {
        self.trailing = Some(Box::new(handler));
        self
    }

    /// Sets the handler for swipes towards the top edge.
    #[must_use]
    pub fn on_top(mut self, handler: impl FnMut(&T) + Send + 'static) -> Self {
        self.top = Some(Box::new(handler));
        self
    }

    /// Sets the handler for swipes towards the bottom edge.
    #[must_use]
    pub fn on_bottom(mut self, handler: impl FnMut(&T) + Send + 'static) -> Self {
        self.bottom = Some(Box::new(handler));
        self
    }

    /// Calls every handler registered for `edge`.
    pub fn dispatch(&mut self, edge: SwipeEdge, item: &T) {
        if let Some(handler) = self.on_swipe.as_mut() {
            handler(edge, item);
        }
        let edge_handler = match edge {
            SwipeEdge::Leading => self.leading.as_mut(),
            SwipeEdge::Trailing => self.trailing.as_mut(),
            SwipeEdge::Top => self.top.as_mut(),
            SwipeEdge::Bottom => self.bottom.as_mut(),
        };
        if let Some(handler) = edge_handler {
            handler(item);
        }
    }
}

impl<T> Default for SwipeActions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SwipeActions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeActions")
            .field("on_swipe", &self.on_swipe.is_some())
            .field("leading", &self.leading.is_some())
            .field("trailing", &self.trailing.is_some())
            .field("top", &self.top.is_some())
            .field("bottom", &self.bottom.is_some())
            .finish()
    }
}

/// Interaction controller for one rendered deck.
pub struct DeckController<T: DeckItem> {
    /// Validated configuration.
    config: DeckConfig,
    /// Current gesture state.
    state: InteractionState<T::Id>,
    /// Host callbacks.
    actions: SwipeActions<T>,
}

impl<T: DeckItem> DeckController<T> {
    /// Creates an idle controller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::InvalidConfig`] if `config` breaks an
    /// invariant.
    pub fn new(config: DeckConfig) -> DeckResult<Self> {
        Ok(Self {
            config: config.validated()?,
            state: InteractionState::Idle,
            actions: SwipeActions::new(),
        })
    }

    /// Sets the swipe callbacks.
    #[must_use]
    pub fn with_actions(mut self, actions: SwipeActions<T>) -> Self {
        self.actions = actions;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Replaces the configuration. The gesture state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::InvalidConfig`] and keeps the old
    /// configuration if `config` breaks an invariant.
    pub fn set_config(&mut self, config: DeckConfig) -> DeckResult<()> {
        self.config = config.validated()?;
        Ok(())
    }

    /// Returns the gesture state.
    #[must_use]
    pub fn state(&self) -> &InteractionState<T::Id> {
        &self.state
    }

    /// Returns the tracked card, if any.
    #[must_use]
    pub fn active_item_id(&self) -> Option<&T::Id> {
        match &self.state {
            InteractionState::Idle => None,
            InteractionState::Dragging { item_id, .. } => Some(item_id),
        }
    }

    /// Returns the last drag translation, zero when idle.
    #[must_use]
    pub fn drag_translation(&self) -> Vec2 {
        match &self.state {
            InteractionState::Idle => Vec2::ZERO,
            InteractionState::Dragging { translation, .. } => *translation,
        }
    }

    /// Returns true while a card is tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Returns true if `item` is the tracked card.
    #[must_use]
    pub fn is_active(&self, item: &T) -> bool {
        self.active_item_id().is_some_and(|id| id == item.id())
    }

    /// Feeds one drag tick for `item`.
    ///
    /// Starts tracking `item` when idle, ignores every other card while
    /// dragging, and eagerly reorders `items` for the tracked card.
    pub fn drag_changed(&mut self, items: &mut Vec<T>, item: &T, translation: Vec2) -> DragUpdate {
        let id = item.id();
        let tracked = match &self.state {
            InteractionState::Idle => None,
            InteractionState::Dragging { item_id, .. } => Some(item_id == id),
        };

        match tracked {
            Some(false) => {
                tracing::trace!("Ignoring drag for untracked item {:?}", id);
                return DragUpdate::Ignored;
            }
            None => {
                tracing::debug!("Drag started on item {:?}", id);
                self.state = InteractionState::Dragging {
                    item_id: id.clone(),
                    translation,
                };
            }
            Some(true) => {
                if let InteractionState::Dragging { translation: current, .. } = &mut self.state {
                    *current = translation;
                }
            }
        }

        let past_threshold = is_past_threshold(translation, &self.config);
        let reordered = if past_threshold {
            items.move_to_back(item)
        } else {
            items.move_to_front(item)
        };

        DragUpdate::Tracking {
            past_threshold,
            reordered,
        }
    }

    /// Ends the current drag.
    ///
    /// If the last translation was past threshold, the swipe callbacks run
    /// with the classified edge and the tracked card, and the swipe is
    /// returned. The controller is idle afterwards in every case.
    pub fn drag_ended(&mut self, items: &[T]) -> Option<Swipe<T::Id>> {
        let state = std::mem::take(&mut self.state);
        let InteractionState::Dragging { item_id, translation } = state else {
            return None;
        };

        let Some(edge) = SwipeEdge::classify(translation, &self.config) else {
            tracing::debug!("Drag on item {:?} ended under threshold", item_id);
            return None;
        };

        let Some(item) = items.iter().find(|candidate| *candidate.id() == item_id) else {
            tracing::debug!("Swiped item {:?} is no longer in the deck", item_id);
            return None;
        };

        tracing::debug!("Item {:?} swiped towards {:?}", item_id, edge);
        self.actions.dispatch(edge, item);

        Some(Swipe { edge, item_id })
    }

    /// Drops the current drag without running any callback.
    pub fn cancel_drag(&mut self) {
        if let InteractionState::Dragging { item_id, .. } = std::mem::take(&mut self.state) {
            tracing::debug!("Drag on item {:?} cancelled", item_id);
        }
    }

    /// Computes the transform of `item` for this frame.
    ///
    /// Returns `None` for cards outside the visible subset. While a shuffle
    /// is running the stacking offset is suppressed so the cards float
    /// together.
    #[must_use]
    pub fn transform(&self, item: &T, visible: &[&T], is_shuffling: bool) -> Option<ItemTransform> {
        let depth = depth_index(item, visible)?;

        let (offset, rotation_degrees) = if self.is_active(item) {
            let translation = self.drag_translation();
            (translation, translation.x * self.config.drag_rotation_factor)
        } else {
            (Vec2::ZERO, 0.0)
        };

        let vertical_offset = if is_shuffling {
            0.0
        } else {
            vertical_offset_at_depth(depth, &self.config)
        };

        Some(ItemTransform {
            offset,
            rotation_degrees,
            scale: scale_at_depth(depth, &self.config),
            vertical_offset,
            z_order: z_order(depth, visible.len()),
        })
    }
}

impl<T: DeckItem> std::fmt::Debug for DeckController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("actions", &self.actions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::visible_items;
    use crate::ordering::tests::{cards, Card};
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Log = Arc<Mutex<Vec<(SwipeEdge, u32)>>>;

    fn recording_controller() -> (DeckController<Card>, Log) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let controller = DeckController::new(DeckConfig::default())
            .unwrap()
            .with_actions(SwipeActions::new().on_swipe(move |edge, card: &Card| {
                sink.lock().push((edge, card.0));
            }));
        (controller, log)
    }

    fn ids(items: &[Card]) -> Vec<u32> {
        items.iter().map(|c| c.0).collect()
    }

    #[test]
    fn test_threshold_classification() {
        let config = DeckConfig::default().with_drag_thresholds(100.0, 250.0);

        assert_eq!(SwipeEdge::classify(Vec2::new(120.0, 0.0), &config), Some(SwipeEdge::Trailing));
        assert_eq!(SwipeEdge::classify(Vec2::new(-120.0, 0.0), &config), Some(SwipeEdge::Leading));
        assert_eq!(SwipeEdge::classify(Vec2::new(0.0, 300.0), &config), Some(SwipeEdge::Bottom));
        assert_eq!(SwipeEdge::classify(Vec2::new(0.0, -300.0), &config), Some(SwipeEdge::Top));
        assert_eq!(SwipeEdge::classify(Vec2::new(50.0, 50.0), &config), None);
        assert!(!is_past_threshold(Vec2::new(50.0, 50.0), &config));
    }

    #[test]
    fn test_horizontal_wins_on_diagonal() {
        let config = DeckConfig::default();
        assert_eq!(
            SwipeEdge::classify(Vec2::new(-150.0, 400.0), &config),
            Some(SwipeEdge::Leading)
        );
    }

    #[test]
    fn test_drag_commit_round_trip() {
        let (mut controller, _) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(150.0, 0.0));
        assert_eq!(ids(&items), vec![1, 2, 0]);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(10.0, 0.0));
        assert_eq!(ids(&items), vec![0, 1, 2]);
    }

    #[test]
    fn test_swipe_callback_edges() {
        let cases = [
            (Vec2::new(120.0, 0.0), SwipeEdge::Trailing),
            (Vec2::new(-120.0, 0.0), SwipeEdge::Leading),
            (Vec2::new(0.0, 300.0), SwipeEdge::Bottom),
            (Vec2::new(0.0, -300.0), SwipeEdge::Top),
        ];

        for (translation, expected) in cases {
            let (mut controller, log) = recording_controller();
            let mut items = cards(3);

            controller.drag_changed(&mut items, &Card(0), translation);
            let swipe = controller.drag_ended(&items);

            assert_eq!(swipe, Some(Swipe { edge: expected, item_id: 0 }));
            assert_eq!(*log.lock(), vec![(expected, 0)]);
            assert_eq!(ids(&items), vec![1, 2, 0]);
        }
    }

    #[test]
    fn test_under_threshold_fires_nothing() {
        let (mut controller, log) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(50.0, 50.0));
        assert_eq!(controller.drag_ended(&items), None);

        assert!(log.lock().is_empty());
        assert_eq!(ids(&items), vec![0, 1, 2]);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_untracked_item_is_ignored() {
        let (mut controller, _) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(20.0, 0.0));
        let update = controller.drag_changed(&mut items, &Card(1), Vec2::new(500.0, 0.0));

        assert_eq!(update, DragUpdate::Ignored);
        assert_eq!(controller.active_item_id(), Some(&0));
        assert_eq!(controller.drag_translation(), Vec2::new(20.0, 0.0));
        assert_eq!(ids(&items), vec![0, 1, 2]);
    }

    #[test]
    fn test_drag_end_resets_state() {
        let (mut controller, _) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(200.0, 0.0));
        controller.drag_ended(&items);

        assert_eq!(*controller.state(), InteractionState::Idle);
        assert_eq!(controller.active_item_id(), None);
        assert_eq!(controller.drag_translation(), Vec2::ZERO);

        // A new gesture may track another card.
        let update = controller.drag_changed(&mut items, &Card(1), Vec2::new(5.0, 0.0));
        assert!(matches!(update, DragUpdate::Tracking { past_threshold: false, .. }));
    }

    #[test]
    fn test_drag_end_when_idle() {
        let (mut controller, log) = recording_controller();
        assert_eq!(controller.drag_ended(&cards(3)), None);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_removed_item_swipe_is_dropped() {
        let (mut controller, log) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(200.0, 0.0));
        items.retain(|c| c.0 != 0);

        assert_eq!(controller.drag_ended(&items), None);
        assert!(log.lock().is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cancel_drag_skips_callback() {
        let (mut controller, log) = recording_controller();
        let mut items = cards(3);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(200.0, 0.0));
        controller.cancel_drag();

        assert!(!controller.is_dragging());
        assert_eq!(controller.drag_ended(&items), None);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_per_edge_actions() {
        let left: Arc<Mutex<Vec<u32>>> = Arc::default();
        let up: Arc<Mutex<Vec<u32>>> = Arc::default();
        let (left_sink, up_sink) = (Arc::clone(&left), Arc::clone(&up));

        let mut controller = DeckController::new(DeckConfig::default())
            .unwrap()
            .with_actions(
                SwipeActions::new()
                    .on_leading(move |card: &Card| left_sink.lock().push(card.0))
                    .on_top(move |card: &Card| up_sink.lock().push(card.0)),
            );
        let mut items = cards(4);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(-300.0, 0.0));
        controller.drag_ended(&items);
        controller.drag_changed(&mut items, &Card(1), Vec2::new(0.0, -300.0));
        controller.drag_ended(&items);
        controller.drag_changed(&mut items, &Card(2), Vec2::new(300.0, 0.0));
        controller.drag_ended(&items);

        assert_eq!(*left.lock(), vec![0]);
        assert_eq!(*up.lock(), vec![1]);
    }

    #[test]
    fn test_transform_of_active_and_stacked_cards() {
        let (mut controller, _) = recording_controller();
        let mut items = cards(5);

        controller.drag_changed(&mut items, &Card(0), Vec2::new(40.0, -10.0));
        let visible = visible_items(&items, controller.config());

        let top = controller.transform(&Card(0), &visible, false).unwrap();
        assert_eq!(top.offset, Vec2::new(40.0, -10.0));
        assert!((top.rotation_degrees - 0.4).abs() < 1e-6);
        assert!((top.scale - 1.0).abs() < f32::EPSILON);
        assert!((top.z_order - 5.0).abs() < f32::EPSILON);

        let second = controller.transform(&Card(2), &visible, false).unwrap();
        assert_eq!(second.offset, Vec2::ZERO);
        assert!((second.rotation_degrees).abs() < f32::EPSILON);
        assert!((second.vertical_offset - 20.0).abs() < f32::EPSILON);
        assert!((second.scale - 0.96).abs() < 1e-6);

        let shuffling = controller.transform(&Card(2), &visible, true).unwrap();
        assert!(shuffling.vertical_offset.abs() < f32::EPSILON);
    }

    #[test]
    fn test_transform_of_hidden_card() {
        let (controller, _) = recording_controller();
        let items = cards(25);
        let visible = visible_items(&items, controller.config());

        assert!(controller.transform(&Card(12), &visible, false).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DeckConfig::default().modified(|c| c.scale_offset = 0.0);
        assert!(DeckController::<Card>::new(config).is_err());

        let (mut controller, _) = recording_controller();
        assert!(controller.set_config(config).is_err());
        assert_eq!(*controller.config(), DeckConfig::default());
    }

    thread_local! {
        static ID_CLONES: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
    }

    /// Id that counts how often it is cloned on this thread.
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct CountedId(u32);

    impl Clone for CountedId {
        fn clone(&self) -> Self {
            ID_CLONES.with(|clones| clones.set(clones.get() + 1));
            Self(self.0)
        }
    }

    #[derive(Debug)]
    struct Slip {
        id: CountedId,
    }

    impl DeckItem for Slip {
        type Id = CountedId;

        fn id(&self) -> &CountedId {
            &self.id
        }
    }

    #[test]
    fn test_drag_ticks_do_not_clone_ids() {
        let mut items: Vec<Slip> = (0..50).map(|n| Slip { id: CountedId(n) }).collect();
        let mut controller: DeckController<Slip> =
            DeckController::new(DeckConfig::default()).unwrap();
        let dragged = Slip { id: CountedId(30) };
        ID_CLONES.with(|clones| clones.set(0));

        for step in 1..=20u8 {
            controller.drag_changed(&mut items, &dragged, Vec2::new(f32::from(step) * 10.0, 0.0));
            let visible = visible_items(&items, controller.config());
            for item in &visible {
                assert!(controller.transform(item, &visible, false).is_some());
            }
        }

        // The tracked id is stored once, when the drag starts.
        assert_eq!(ID_CLONES.with(std::cell::Cell::get), 1);
        assert_eq!(items.last().map(|slip| slip.id.0), Some(30));
    }
}
