//! Widget-external input events and the bus that carries them.
//!
//! Keyboard navigation and outside pointer-downs are observed globally rather
//! than through the input element, so the renderer publishes them on an
//! [`EventBus`]. A controller subscribes when it is mounted and drops its
//! receiver when it is unmounted.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of buffered events per subscriber.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Keys the result list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavKey {
    /// Move the highlight down, wrapping to the first row.
    ArrowDown,
    /// Move the highlight up, wrapping to the last row.
    ArrowUp,
    /// Commit the highlighted row.
    Enter,
    /// Clear the highlight (and possibly close, see [`EscapeBehavior`](crate::EscapeBehavior)).
    Escape,
}

/// Where a pointer-down landed relative to the widget's bounding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Inside the input or the dropdown.
    Widget,
    /// Anywhere else.
    Outside,
}

/// Input observed outside the widget's own handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiEvent {
    /// A key was pressed anywhere in the application.
    KeyDown(NavKey),
    /// A pointer button went down.
    PointerDown(PointerTarget),
}

/// Broadcast bus for [`UiEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns how many subscribers received it.
    pub fn publish(&self, event: UiEvent) -> usize {
        match self.tx.send(event) {
            Ok(delivered) => delivered,
            Err(_) => {
                trace!(?event, "no subscribers for ui event");
                0
            }
        }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}
