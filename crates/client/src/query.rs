//! Declarative description of one data request.
//!
//! A [`DataQuery`] bundles the conjunctive filter list, the structure
//! projection (output key to source key) and the optional `latestBy`
//! parameter. The pipeline passes filters through without interpreting
//! them; the server owns their semantics.

use std::collections::BTreeMap;

use covdash_core::filter::{join_filters, FilterParam};

/// Parameters for one request against the data endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataQuery {
    /// AND-combined server-side constraints.
    pub filters: Vec<FilterParam>,
    /// Projection: output key -> source key.
    pub structure: BTreeMap<String, String>,
    /// Ask the server for only the latest record carrying this metric.
    pub latest_by: Option<String>,
}

impl DataQuery {
    /// Create a query with the given filters and an empty projection.
    pub fn new(filters: Vec<FilterParam>) -> Self {
        Self {
            filters,
            structure: BTreeMap::new(),
            latest_by: None,
        }
    }

    /// Project a source key under the same name (the common case).
    pub fn with_field(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.structure.insert(key.clone(), key);
        self
    }

    /// Project `source` under `output`.
    pub fn with_mapping(mut self, output: impl Into<String>, source: impl Into<String>) -> Self {
        self.structure.insert(output.into(), source.into());
        self
    }

    /// Append an extra filter constraint.
    pub fn with_filter(mut self, filter: FilterParam) -> Self {
        self.filters.push(filter);
        self
    }

    /// Restrict the response to the latest record for `metric`.
    pub fn with_latest_by(mut self, metric: impl Into<String>) -> Self {
        self.latest_by = Some(metric.into());
        self
    }

    /// Conjunctive wire form of the filters: `areaType=nation;areaName=England`.
    pub fn filters_string(&self) -> String {
        join_filters(&self.filters)
    }

    /// JSON wire form of the structure projection.
    pub fn structure_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .structure
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::Value::Object(map).to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_join_conjunctively() {
        let query = DataQuery::new(vec![
            FilterParam::eq("areaType", "nation"),
            FilterParam::eq("areaName", "England"),
        ]);
        assert_eq!(query.filters_string(), "areaType=nation;areaName=England");
    }

    #[test]
    fn with_field_projects_under_same_name() {
        let query = DataQuery::default().with_field("date").with_field("cases");
        assert_eq!(query.structure_json(), r#"{"cases":"cases","date":"date"}"#);
    }

    #[test]
    fn with_mapping_renames_source_key() {
        let query = DataQuery::default().with_mapping("cases", "newCasesByPublishDate");
        assert_eq!(
            query.structure_json(),
            r#"{"cases":"newCasesByPublishDate"}"#
        );
    }

    #[test]
    fn with_filter_appends() {
        let query = DataQuery::new(vec![FilterParam::eq("areaType", "nation")])
            .with_filter(FilterParam::eq("latestBy", "cumCasesByPublishDate"));
        assert_eq!(
            query.filters_string(),
            "areaType=nation;latestBy=cumCasesByPublishDate"
        );
    }
}
