//! Declarative metric field configuration.
//!
//! A [`MetricField`] names one metric to request from the data source
//! and carries the display metadata (label, value type, colour hint)
//! that the chart and table renderers use. Views declare their fields
//! as an ordered, immutable list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a field's values should be formatted when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Numeric,
    Date,
    Text,
}

/// One declared metric with its display metadata.
///
/// `value` is the key under which the data source reports the metric
/// and under which shaped rows carry it; `label` is the human-readable
/// column or legend name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricField {
    /// Source/projection key, e.g. `"newCasesByPublishDate"`.
    pub value: String,
    /// Display name, e.g. `"New cases"`.
    pub label: String,
    /// Drives per-cell formatting in table renderers.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional palette index hint for chart renderers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<usize>,
}

impl MetricField {
    /// Create a numeric field.
    pub fn numeric(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            field_type: FieldType::Numeric,
            colour: None,
        }
    }

    /// Create a date field.
    pub fn date(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            field_type: FieldType::Date,
            colour: None,
        }
    }

    /// Create a text field.
    pub fn text(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            field_type: FieldType::Text,
            colour: None,
        }
    }

    /// Attach a palette index hint.
    pub fn with_colour(mut self, colour: usize) -> Self {
        self.colour = Some(colour);
        self
    }
}

/// Check a declared field list for configuration mistakes.
///
/// Rejects an empty list and duplicate `value` keys. Duplicate keys
/// would make shaped column names collide silently, so this is treated
/// as a usage error rather than a runtime condition.
pub fn validate_fields(fields: &[MetricField]) -> Result<(), CoreError> {
    if fields.is_empty() {
        return Err(CoreError::Validation(
            "a view must declare at least one field".into(),
        ));
    }

    let mut seen = std::collections::BTreeSet::new();
    for field in fields {
        if !seen.insert(field.value.as_str()) {
            return Err(CoreError::Validation(format!(
                "duplicate field value key: {}",
                field.value
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_type() {
        assert_eq!(
            MetricField::numeric("cases", "Cases").field_type,
            FieldType::Numeric
        );
        assert_eq!(MetricField::date("date", "Date").field_type, FieldType::Date);
        assert_eq!(
            MetricField::text("areaName", "Area").field_type,
            FieldType::Text
        );
    }

    #[test]
    fn with_colour_sets_hint() {
        let field = MetricField::numeric("cases", "Cases").with_colour(3);
        assert_eq!(field.colour, Some(3));
    }

    #[test]
    fn validate_accepts_distinct_fields() {
        let fields = vec![
            MetricField::numeric("cases", "Cases"),
            MetricField::numeric("deaths", "Deaths"),
        ];
        assert!(validate_fields(&fields).is_ok());
    }

    #[test]
    fn validate_rejects_empty_list() {
        assert!(validate_fields(&[]).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_keys() {
        let fields = vec![
            MetricField::numeric("cases", "Cases"),
            MetricField::numeric("cases", "Cases again"),
        ];
        assert!(validate_fields(&fields).is_err());
    }
}
