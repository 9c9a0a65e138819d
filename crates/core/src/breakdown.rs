//! Grouped-mode shaping: per-metric category breakdowns (age bands and
//! similar) become one table keyed by category.
//!
//! The input maps each metric name to its list of [`CategoryEntry`]
//! records. All metrics are assumed to share the same category set and
//! value-field shape. That is a caller contract, not re-validated
//! here; a metric missing a category simply leaves those columns out
//! of that row.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::row::{CategoryEntry, CategoryRow};

/// Regex matching an integer prefix on a category label.
static LEADING_INT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(\d+)").expect("valid regex"));

/// Normalise a raw category label for display.
///
/// Underscores become spaces and the literal token `to` becomes a
/// hyphen, so `"70_to_79"` reads `"70 - 79"` and `"under_5"` reads
/// `"under 5"`.
pub fn normalise_category_label(label: &str) -> String {
    label.replace("to", "-").replace('_', " ")
}

/// Namespace a value field under its metric: `("maleCases", "rate")`
/// becomes `"maleCasesRate"`.
pub fn namespace_column(metric: &str, sub_field: &str) -> String {
    let mut chars = sub_field.chars();
    match chars.next() {
        Some(first) => format!("{metric}{}{}", first.to_uppercase(), chars.as_str()),
        None => metric.to_string(),
    }
}

/// Round to one decimal place when the value carries a fractional
/// part; integral values pass through untouched.
pub fn round_fractional(value: f64) -> f64 {
    if value.fract() != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    }
}

/// Integer prefix parsable from a category label, if any. Labels like
/// `"under_5"` carry a digit but do not start with one, so they have
/// no leading integer.
fn leading_int(label: &str) -> Option<u64> {
    LEADING_INT_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Merge per-metric category breakdowns into one row per category.
///
/// Every value field of every entry lands in its category's row under
/// the metric-namespaced column name, with fractional values rounded
/// to one decimal place. Category labels are normalised via
/// [`normalise_category_label`].
///
/// Ordering: ascending by the integer prefix of the raw category
/// label. Labels with no integer prefix form a tail sorted lexically,
/// a deterministic fallback for the non-numeric case.
pub fn merge_category_breakdown(
    input: &BTreeMap<String, Vec<CategoryEntry>>,
) -> Vec<CategoryRow> {
    // Keyed by the raw category so entries merge before normalisation.
    let mut merged: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for (metric, entries) in input {
        for entry in entries {
            let row = merged.entry(entry.category.clone()).or_default();
            for (sub_field, value) in &entry.values {
                row.insert(namespace_column(metric, sub_field), round_fractional(*value));
            }
        }
    }

    let mut rows: Vec<(String, BTreeMap<String, f64>)> = merged.into_iter().collect();
    rows.sort_by(|(a, _), (b, _)| match (leading_int(a), leading_int(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    rows.into_iter()
        .map(|(category, columns)| CategoryRow {
            category: normalise_category_label(&category),
            columns,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
