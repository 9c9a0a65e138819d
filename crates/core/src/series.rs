//! Merge-mode series shaping: several per-area time series become one
//! wide table keyed by date.
//!
//! Each input [`AreaRow`] carries one area's metric values for one
//! date. [`merge_area_series`] groups rows by date and emits one
//! [`MergedRow`] per distinct date, with a column for every
//! `(area × metric)` pair observed anywhere in the input. An area
//! missing a value on a date yields `None` for that column, never zero.
//!
//! [`expand_area_fields`] performs the companion step on the field
//! list itself, deriving one display field per `(field × area)` pair
//! so renderers see the same namespaced columns.

use std::collections::BTreeMap;

use crate::field::{FieldType, MetricField};
use crate::row::{AreaRow, MergedRow};
use crate::types::SeriesDate;

/// Distinct area names present in the input, ascending lexical order.
pub fn area_names(rows: &[AreaRow]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|r| r.area_name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Value keys of the non-date declared fields, in declared order.
fn metric_keys(fields: &[MetricField]) -> Vec<&str> {
    fields
        .iter()
        .filter(|f| f.field_type != FieldType::Date)
        .map(|f| f.value.as_str())
        .collect()
}

/// Merge per-area rows into one wide row per date.
///
/// Output is ascending by date with exactly one row per distinct input
/// date. Every `(area, field)` pair observed across the whole input is
/// materialised as a column in every row, named `{area}{field.value}`;
/// `None` marks a pair with no value on that date.
///
/// Within a date group, contributing rows are sorted ascending by
/// `area_name` before merging so the result is deterministic regardless
/// of input order. Duplicate `(date, area_name)` rows are tolerated:
/// the sort is stable, so the later input row overwrites the earlier
/// one (last wins).
///
/// Empty input produces empty output.
pub fn merge_area_series(rows: &[AreaRow], fields: &[MetricField]) -> Vec<MergedRow> {
    let areas = area_names(rows);
    let keys = metric_keys(fields);

    // One entry per (area × field) pair; cloned per date so absent
    // columns stay explicitly present as None.
    let mut template: BTreeMap<String, Option<f64>> = BTreeMap::new();
    for area in &areas {
        for key in &keys {
            template.insert(format!("{area}{key}"), None);
        }
    }

    let mut by_date: BTreeMap<SeriesDate, Vec<&AreaRow>> = BTreeMap::new();
    for row in rows {
        by_date.entry(row.date).or_default().push(row);
    }

    by_date
        .into_iter()
        .map(|(date, mut group)| {
            group.sort_by(|a, b| a.area_name.cmp(&b.area_name));

            let mut columns = template.clone();
            for row in group {
                for key in &keys {
                    columns.insert(format!("{}{}", row.area_name, key), row.metric(key));
                }
            }

            MergedRow { date, columns }
        })
        .collect()
}

/// Expand declared fields into one derived field per area.
///
/// Declared field order is the outer loop, area order the inner, so a
/// palette reads consistently across metrics. Each derived field is
/// namespaced by its area: value key `{area}{value}`, label
/// `{area} {label}`. The colour hint comes from the caller's palette
/// indexed by area position, falling back to the position itself.
///
/// Date-typed declared fields are skipped; `include_date` prepends a
/// single `date` field instead (table mode wants an explicit date
/// column, charts carry the date on the x axis).
pub fn expand_area_fields(
    fields: &[MetricField],
    area_names: &[String],
    colours: Option<&[usize]>,
    include_date: bool,
) -> Vec<MetricField> {
    let mut expanded = Vec::new();

    if include_date {
        expanded.push(MetricField::date("date", "Date"));
    }

    for field in fields.iter().filter(|f| f.field_type != FieldType::Date) {
        for (index, area) in area_names.iter().enumerate() {
            let colour = colours
                .and_then(|palette| palette.get(index).copied())
                .unwrap_or(index);

            expanded.push(
                MetricField {
                    value: format!("{area}{}", field.value),
                    label: format!("{area} {}", field.label),
                    field_type: field.field_type,
                    colour: None,
                }
                .with_colour(colour),
            );
        }
    }

    expanded
}

/// Drop the leading run of dates on which every listed metric is zero
/// or absent across all areas.
///
/// Rows from the first "live" date onwards are kept in input order;
/// zeros after that date are preserved. If no row carries a non-zero
/// value the result is empty.
pub fn drop_leading_zeros(rows: &[AreaRow], metric_keys: &[&str]) -> Vec<AreaRow> {
    let first_live = rows
        .iter()
        .filter(|row| {
            metric_keys
                .iter()
                .any(|key| row.metric(key).is_some_and(|v| v != 0.0))
        })
        .map(|row| row.date)
        .min();

    match first_live {
        Some(start) => rows.iter().filter(|r| r.date >= start).cloned().collect(),
        None => Vec::new(),
    }
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

    fn cases_fields() -> Vec<MetricField> {
        vec![MetricField::numeric("cases", "Cases")]
    }

    fn sample_rows() -> Vec<AreaRow> {
        vec![
            AreaRow::new(date("2020-04-01"), "England").with_metric("cases", 10.0),
            AreaRow::new(date("2020-04-01"), "Wales").with_metric("cases", 3.0),
            AreaRow::new(date("2020-04-02"), "England").with_metric("cases", 12.0),
        ]
    }

    // -- merge_area_series ---------------------------------------------------

    #[test]
    fn one_row_per_date_ascending() {
        let merged = merge_area_series(&sample_rows(), &cases_fields());

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].date, date("2020-04-01"));
        assert_eq!(merged[1].date, date("2020-04-02"));
    }

    #[test]
    fn every_area_field_pair_has_a_column_in_every_row() {
        let merged = merge_area_series(&sample_rows(), &cases_fields());

        for row in &merged {
            assert!(row.columns.contains_key("Englandcases"));
            assert!(row.columns.contains_key("Walescases"));
        }

        // Wales has no value on the second date: column present, value absent.
        assert_eq!(merged[0].columns["Englandcases"], Some(10.0));
        assert_eq!(merged[0].columns["Walescases"], Some(3.0));
        assert_eq!(merged[1].columns["Englandcases"], Some(12.0));
        assert_eq!(merged[1].columns["Walescases"], None);
    }

    #[test]
    fn merge_is_deterministic_regardless_of_input_order() {
        let mut reversed = sample_rows();
        reversed.reverse();

        assert_eq!(
            merge_area_series(&sample_rows(), &cases_fields()),
            merge_area_series(&reversed, &cases_fields())
        );
    }

    #[test]
    fn merge_is_pure() {
        let rows = sample_rows();
        let fields = cases_fields();
        assert_eq!(
            merge_area_series(&rows, &fields),
            merge_area_series(&rows, &fields)
        );
    }

    #[test]
    fn duplicate_date_area_pair_last_wins() {
        let rows = vec![
            AreaRow::new(date("2020-04-01"), "England").with_metric("cases", 10.0),
            AreaRow::new(date("2020-04-01"), "England").with_metric("cases", 11.0),
        ];

        let merged = merge_area_series(&rows, &cases_fields());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].columns["Englandcases"], Some(11.0));
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert!(merge_area_series(&[], &cases_fields()).is_empty());
    }

    #[test]
    fn date_typed_fields_do_not_become_columns() {
        let fields = vec![
            MetricField::date("date", "Date"),
            MetricField::numeric("cases", "Cases"),
        ];
        let merged = merge_area_series(&sample_rows(), &fields);

        assert!(merged[0].columns.contains_key("Englandcases"));
        assert!(!merged[0].columns.contains_key("Englanddate"));
    }

    // -- expand_area_fields --------------------------------------------------

    #[test]
    fn expansion_is_field_outer_area_inner() {
        let fields = vec![
            MetricField::numeric("cases", "Cases"),
            MetricField::numeric("deaths", "Deaths"),
        ];
        let areas = vec!["England".to_string(), "Wales".to_string()];

        let expanded = expand_area_fields(&fields, &areas, None, false);
        let values: Vec<&str> = expanded.iter().map(|f| f.value.as_str()).collect();

        assert_eq!(
            values,
            vec!["Englandcases", "Walescases", "Englanddeaths", "Walesdeaths"]
        );
        assert_eq!(expanded[0].label, "England Cases");
    }

    #[test]
    fn expansion_takes_colours_from_palette_by_area_index() {
        let fields = cases_fields();
        let areas = vec!["England".to_string(), "Wales".to_string()];

        let expanded = expand_area_fields(&fields, &areas, Some(&[7, 2]), false);
        assert_eq!(expanded[0].colour, Some(7));
        assert_eq!(expanded[1].colour, Some(2));

        // Without a palette the area index itself is the hint.
        let expanded = expand_area_fields(&fields, &areas, None, false);
        assert_eq!(expanded[0].colour, Some(0));
        assert_eq!(expanded[1].colour, Some(1));
    }

    #[test]
    fn expansion_prepends_date_field_when_asked() {
        let areas = vec!["England".to_string()];
        let expanded = expand_area_fields(&cases_fields(), &areas, None, true);

        assert_eq!(expanded[0].value, "date");
        assert_eq!(expanded[0].field_type, FieldType::Date);
        assert_eq!(expanded[1].value, "Englandcases");
    }

    #[test]
    fn expansion_with_no_areas_is_empty() {
        let expanded = expand_area_fields(&cases_fields(), &[], None, false);
        assert!(expanded.is_empty());
    }

    // -- drop_leading_zeros --------------------------------------------------

    #[test]
    fn leading_zero_dates_are_dropped() {
        let rows = vec![
            AreaRow::new(date("2020-03-30"), "England").with_metric("cases", 0.0),
            AreaRow::new(date("2020-03-31"), "England").with_metric("cases", 0.0),
            AreaRow::new(date("2020-04-01"), "England").with_metric("cases", 5.0),
            AreaRow::new(date("2020-04-02"), "England").with_metric("cases", 0.0),
        ];

        let kept = drop_leading_zeros(&rows, &["cases"]);
        let dates: Vec<SeriesDate> = kept.iter().map(|r| r.date).collect();

        // Interior zeros after the first live date survive.
        assert_eq!(dates, vec![date("2020-04-01"), date("2020-04-02")]);
    }

    #[test]
    fn all_zero_series_drops_everything() {
        let rows = vec![
            AreaRow::new(date("2020-03-30"), "England").with_metric("cases", 0.0),
            AreaRow::new(date("2020-03-31"), "Wales").with_metric("cases", 0.0),
        ];
        assert!(drop_leading_zeros(&rows, &["cases"]).is_empty());
    }

    #[test]
    fn absent_metric_counts_as_zero_for_the_leading_run() {
        let rows = vec![
            AreaRow::new(date("2020-03-30"), "England"),
            AreaRow::new(date("2020-03-31"), "England").with_metric("cases", 2.0),
        ];

        let kept = drop_leading_zeros(&rows, &["cases"]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date, date("2020-03-31"));
    }
}
