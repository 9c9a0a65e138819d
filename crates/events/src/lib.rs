//! Analytics event bus and delivery.
//!
//! Fire-and-forget analytics for the dashboard:
//!
//! - [`AnalyticsBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`AnalyticsEvent`] — the `(category, action, label)` event record.
//! - [`CollectorDelivery`] — background task forwarding events to an
//!   HTTP collector; failures are logged, never propagated.

pub mod bus;
pub mod delivery;

pub use bus::{AnalyticsBus, AnalyticsEvent};
pub use delivery::CollectorDelivery;
