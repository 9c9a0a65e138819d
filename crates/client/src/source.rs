//! The fetch seam between the query layer and the HTTP transport.
//!
//! [`QueryHandle`](crate::handle::QueryHandle) and the retry helpers
//! work against this trait rather than [`DashboardApi`] directly, so
//! tests can substitute a scripted source.

use async_trait::async_trait;
use covdash_core::row::AreaRow;

use crate::api::{ApiError, DashboardApi};
use crate::query::DataQuery;

/// Opaque fetch primitive: `request(filters) -> rows | error`.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    /// Fetch time-series rows for the given query.
    async fn fetch_rows(&self, query: &DataQuery) -> Result<Vec<AreaRow>, ApiError>;
}

#[async_trait]
impl DataSource for DashboardApi {
    async fn fetch_rows(&self, query: &DataQuery) -> Result<Vec<AreaRow>, ApiError> {
        DashboardApi::fetch_rows(self, query).await
    }
}
