//! In-process analytics bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`AnalyticsBus`] is the fan-out hub for [`AnalyticsEvent`]s. It is
//! designed to be shared via `Arc<AnalyticsBus>` across views; a view
//! fires events without knowing whether anything is listening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// AnalyticsEvent
// ---------------------------------------------------------------------------

/// One discrete user-interaction event.
///
/// Mirrors the classic `(category, action, label)` analytics triple:
/// the category groups the interaction kind (e.g. `"Interaction"`),
/// the action names it (e.g. `"Tab change"`), the label carries the
/// specific target (e.g. the selected tab's label).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
    /// When the event was recorded (UTC).
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalyticsBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fire-and-forget fan-out bus for analytics events.
///
/// Wraps a [`broadcast::Sender`] so that any number of sinks (a
/// collector delivery task, a test subscriber) can independently
/// receive every published event.
pub struct AnalyticsBus {
    sender: broadcast::Sender<AnalyticsEvent>,
}

impl AnalyticsBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are
    /// dropped and slow receivers observe `RecvError::Lagged`. Lost
    /// analytics are acceptable; they must never block the UI path.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Zero receivers is not an error: the event is silently dropped.
    pub fn publish(&self, event: AnalyticsEvent) {
        // Ignore the SendError; it only means there are no receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AnalyticsEvent> {
        self.sender.subscribe()
    }
}

impl Default for AnalyticsBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
