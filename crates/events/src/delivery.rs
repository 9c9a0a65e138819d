//! Fire-and-forget delivery of analytics events to an HTTP collector.
//!
//! [`CollectorDelivery::run`] subscribes to the bus and POSTs each
//! event as JSON. Delivery failures are logged and dropped; analytics
//! must never affect the rendering path, so there is no retry and no
//! error propagation.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::bus::AnalyticsEvent;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Forwards analytics events from the bus to a collector endpoint.
pub struct CollectorDelivery {
    client: reqwest::Client,
    collector_url: String,
}

impl CollectorDelivery {
    /// Create a delivery service targeting a collector URL.
    pub fn new(collector_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            collector_url,
        }
    }

    /// Consume events from the bus until the channel closes.
    ///
    /// Intended to be spawned once at startup:
    /// `tokio::spawn(delivery.run(bus.subscribe()))`. Lagged receivers
    /// skip ahead; closed means every sender is gone and the task ends.
    pub async fn run(self, mut rx: broadcast::Receiver<AnalyticsEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.deliver(&event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Analytics receiver lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// POST one event to the collector. Failures are logged, not returned.
    async fn deliver(&self, event: &AnalyticsEvent) {
        let result = self
            .client
            .post(&self.collector_url)
            .json(event)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    category = %event.category,
                    action = %event.action,
                    "Analytics collector rejected event",
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "Analytics delivery failed");
            }
        }
    }
}
