//! HTTP client for the dashboard data API.
//!
//! Provides the declarative query description ([`query::DataQuery`]),
//! the REST client ([`api::DashboardApi`]), the mockable fetch seam
//! ([`source::DataSource`]), the superseding fetch handle
//! ([`handle::QueryHandle`]) and bounded retry ([`retry`]).

pub mod api;
pub mod handle;
pub mod query;
pub mod retry;
pub mod source;

pub use api::{ApiError, DashboardApi};
pub use handle::QueryHandle;
pub use query::DataQuery;
pub use retry::{fetch_rows_with_retry, RetryConfig};
pub use source::DataSource;
