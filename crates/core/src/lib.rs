//! Data model and pure shaping layer for the dashboard pipeline.
//!
//! This crate has no internal dependencies and no I/O. It defines the
//! declarative view configuration ([`field::MetricField`],
//! [`filter::FilterParam`]), the row types exchanged with the data
//! source ([`row::AreaRow`], [`row::CategoryEntry`]), and the two
//! reshaping paths that feed the chart and table renderers:
//!
//! - [`series`] — merge per-area time series into one wide table keyed
//!   by date.
//! - [`breakdown`] — merge per-metric category breakdowns (age bands
//!   and the like) into one table keyed by category.

pub mod breakdown;
pub mod error;
pub mod field;
pub mod filter;
pub mod format;
pub mod row;
pub mod series;
pub mod types;

pub use error::CoreError;
pub use field::{FieldType, MetricField};
pub use filter::{FilterOperator, FilterParam};
pub use row::{AreaRow, CategoryEntry, CategoryRow, MergedRow};
