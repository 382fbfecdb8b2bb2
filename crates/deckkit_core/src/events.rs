//! # Deck Event System
//!
//! Change notifications from the deck to the host view. The bus is generic
//! over the event type so companion crates can broadcast their own events
//! the same way.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ Controller  │─────>│  EventBus   │─────>│  Host view  │
//! │ Shuffle     │      │ (broadcast) │      │  Analytics  │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Every subscriber gets its own bounded crossbeam channel, so a slow
//! consumer only ever loses its own events. Publishing never blocks.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::controller::SwipeEdge;

/// Events published by a deck.
#[derive(Clone, Debug, PartialEq)]
pub enum DeckEvent<Id> {
    /// The item order changed (drag reorder or shuffle).
    Reordered,

    /// A drag ended past threshold and was committed.
    Swiped {
        /// Edge the card was swiped towards.
        edge: SwipeEdge,
        /// The swiped item.
        item_id: Id,
    },

    /// A shuffle animation started.
    ShuffleStarted {
        /// Number of randomized steps that will be published.
        steps: usize,
    },

    /// New shuffle offsets were published.
    ShuffleStep {
        /// 1-based step number.
        step: usize,
        /// Total randomized steps.
        steps: usize,
    },

    /// The real permutation was applied and offsets were cleared.
    ShuffleFinished,

    /// A paged deck moved to another page.
    PageChanged {
        /// Page shown before the change.
        from: usize,
        /// Page shown now.
        to: usize,
    },
}

/// Broadcast bus for change events.
pub struct EventBus<E> {
    /// One sender per live subscriber.
    subscribers: Mutex<Vec<Sender<E>>>,
    /// Capacity of each subscriber channel.
    capacity: usize,
}

impl<E: Clone> EventBus<E> {
    /// Default per-subscriber capacity.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a bus with the given per-subscriber capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Registers a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver<E> {
        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.lock().push(sender);
        EventReceiver { receiver }
    }

    /// Publishes an event to every subscriber (non-blocking).
    ///
    /// Subscribers whose receiver was dropped are removed. A full channel
    /// drops the event for that subscriber only.
    pub fn publish(&self, event: &E) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Event dropped: subscriber channel full");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.lock().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Handle for receiving events.
#[derive(Debug)]
pub struct EventReceiver<E> {
    receiver: Receiver<E>,
}

impl<E> EventReceiver<E> {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives() {
        let bus: EventBus<DeckEvent<u32>> = EventBus::default();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(&DeckEvent::Swiped { edge: SwipeEdge::Leading, item_id: 7 });

        assert_eq!(
            first.try_recv(),
            Some(DeckEvent::Swiped { edge: SwipeEdge::Leading, item_id: 7 })
        );
        assert!(second.has_events());
        assert!(!first.has_events());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let bus: EventBus<DeckEvent<u32>> = EventBus::default();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(&DeckEvent::Reordered);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.drain(), vec![DeckEvent::Reordered]);
    }

    #[test]
    fn test_full_channel_drops_event() {
        let bus: EventBus<DeckEvent<u32>> = EventBus::new(2);
        let receiver = bus.subscribe();

        for _ in 0..5 {
            bus.publish(&DeckEvent::Reordered);
        }

        assert_eq!(receiver.pending_count(), 2);
        assert_eq!(bus.subscriber_count(), 1);
    }
}
