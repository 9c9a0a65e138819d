//! Row types exchanged with the data source and produced by shaping.
//!
//! Raw rows ([`AreaRow`], [`CategoryEntry`]) are ephemeral: produced
//! per request and discarded on the next fetch. Shaped rows
//! ([`MergedRow`], [`CategoryRow`]) are derived purely from raw rows
//! and recomputed whenever the upstream query parameters change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SeriesDate;

/// One raw time-series record: a date, an area, and the requested
/// metric values.
///
/// A well-formed response contains at most one row per
/// `(date, area_name)` pair. Metric values reported as JSON `null`
/// deserialize to `None` and are treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRow {
    pub date: SeriesDate,
    /// Defaults to empty for single-area responses that do not project
    /// `areaName`; merged columns then carry bare metric names.
    #[serde(default, rename = "areaName")]
    pub area_name: String,
    /// Remaining projected columns, keyed by metric value key.
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl AreaRow {
    /// Create a row with no metric values.
    pub fn new(date: SeriesDate, area_name: impl Into<String>) -> Self {
        Self {
            date,
            area_name: area_name.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Attach a metric value.
    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), Some(value));
        self
    }

    /// Look up a metric value, collapsing "key missing" and "value
    /// null" into `None`.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied().flatten()
    }
}

/// One merged (wide) time-series row: a date plus one column per
/// `(area × metric)` pair observed across the whole input.
///
/// A column is present in every row; `None` marks an area that has no
/// value for that metric on that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRow {
    pub date: SeriesDate,
    pub columns: BTreeMap<String, Option<f64>>,
}

/// One raw category-breakdown record for a single metric: the category
/// key (e.g. an age band such as `"70_to_79"`) and its value fields
/// (the metric's primary value plus sub-fields like rate or bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: String,
    /// Value fields keyed by their source name, e.g. `"value"`, `"rate"`.
    pub values: BTreeMap<String, f64>,
}

impl CategoryEntry {
    /// Create an entry with no value fields.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            values: BTreeMap::new(),
        }
    }

    /// Attach a value field.
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

/// One merged category-breakdown row: the normalised category label
/// plus one column per `(metric × sub-field)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub columns: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> SeriesDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn metric_collapses_missing_and_null() {
        let mut row = AreaRow::new(date("2020-04-01"), "England").with_metric("cases", 10.0);
        row.metrics.insert("deaths".into(), None);

        assert_eq!(row.metric("cases"), Some(10.0));
        assert_eq!(row.metric("deaths"), None);
        assert_eq!(row.metric("tests"), None);
    }

    #[test]
    fn area_row_deserializes_flattened_metrics() {
        let json = r#"{"date":"2020-04-01","areaName":"England","cases":10.0,"deaths":null}"#;
        let row: AreaRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.area_name, "England");
        assert_eq!(row.metric("cases"), Some(10.0));
        assert_eq!(row.metric("deaths"), None);
        assert!(row.metrics.contains_key("deaths"));
    }
}
