//! REST client for the dashboard data endpoint.
//!
//! Wraps the `GET /v1/data` query endpoint using [`reqwest`]. The
//! endpoint accepts a conjunctive `filters` list and a `structure`
//! projection, and answers with a `{ "data": [...] }` envelope of
//! row-shaped JSON.

use std::collections::BTreeMap;

use covdash_core::row::{AreaRow, CategoryEntry};
use serde::Deserialize;

use crate::query::DataQuery;

/// HTTP client for a single dashboard API host.
pub struct DashboardApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response envelope returned by the data endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Errors from the data API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("data API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl DashboardApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `https://api.coronavirus.data.gov.uk`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across views).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch time-series rows for a query.
    ///
    /// Sends `GET /v1/data` with the query's filters and structure
    /// projection and deserializes the envelope into [`AreaRow`]s.
    pub async fn fetch_rows(&self, query: &DataQuery) -> Result<Vec<AreaRow>, ApiError> {
        let envelope: Envelope<AreaRow> = self.send(query).await?;
        Ok(envelope.data)
    }

    /// Fetch a category breakdown (e.g. age bands) for a query.
    ///
    /// The endpoint reports one record whose per-metric entries are
    /// nested arrays of category items. `group_key` names the category
    /// field (e.g. `"age"`) and `value_keys` the value fields to keep
    /// from each item. Metrics or fields missing from the payload are
    /// skipped rather than treated as errors.
    pub async fn fetch_breakdown(
        &self,
        query: &DataQuery,
        group_key: &str,
        value_keys: &[&str],
    ) -> Result<BTreeMap<String, Vec<CategoryEntry>>, ApiError> {
        let envelope: Envelope<serde_json::Value> = self.send(query).await?;
        let first = envelope
            .data
            .into_iter()
            .next()
            .unwrap_or(serde_json::Value::Null);

        let mut breakdown = BTreeMap::new();
        for metric in query.structure.keys() {
            let Some(items) = first.get(metric).and_then(|v| v.as_array()) else {
                continue;
            };

            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                let Some(category) = item.get(group_key).and_then(|v| v.as_str()) else {
                    continue;
                };

                let mut entry = CategoryEntry::new(category);
                for key in value_keys {
                    if let Some(value) = item.get(*key).and_then(|v| v.as_f64()) {
                        entry.values.insert((*key).to_string(), value);
                    }
                }
                entries.push(entry);
            }

            breakdown.insert(metric.clone(), entries);
        }

        Ok(breakdown)
    }

    // ---- private helpers ----

    /// Issue the `GET /v1/data` request for a query.
    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        query: &DataQuery,
    ) -> Result<T, ApiError> {
        let mut params = vec![
            ("filters", query.filters_string()),
            ("structure", query.structure_json()),
        ];
        if let Some(metric) = &query.latest_by {
            params.push(("latestBy", metric.clone()));
        }

        let response = self
            .client
            .get(format!("{}/v1/data", self.base_url))
            .query(&params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] carrying
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_deserializes_area_rows() {
        let json = r#"{"data":[
            {"date":"2020-04-01","areaName":"England","cases":10.0},
            {"date":"2020-04-02","areaName":"England","cases":null}
        ]}"#;

        let envelope: Envelope<AreaRow> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].metric("cases"), Some(10.0));
        assert_eq!(envelope.data[1].metric("cases"), None);
    }
}
