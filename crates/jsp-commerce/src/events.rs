//! In-process event bus.
//!
//! Page controllers publish [`StoreEvent`]s after mutating shared state; other
//! controllers (the cart badge, a second "tab") subscribe and re-render.

use tokio::sync::broadcast::{self, error::TryRecvError};

const EVENT_CAPACITY: usize = 64;

/// Events raised by storefront state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    /// The persisted cart was written.
    CartUpdated,
    /// The filter state in the location changed through a push.
    FiltersChanged,
    /// The location was restored from history.
    PopState,
}

/// Broadcast channel of [`StoreEvent`]s. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a new bus with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::trace!(?event, receivers, "event published");
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Take every event currently queued on `receiver` without waiting.
///
/// Events dropped because the subscriber lagged are skipped.
pub fn drain_events(receiver: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "event subscriber lagged");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    events
}
