//! Display formatting for table renderers.
//!
//! A field's [`FieldType`] drives how its cells are formatted: dates
//! render as `28 May 2020`, numbers with thousands separators and at
//! most one decimal place.

use crate::field::{FieldType, MetricField};
use crate::row::MergedRow;
use crate::types::SeriesDate;

/// Format a number with thousands separators.
///
/// Integral values render with no decimal part; fractional values keep
/// one decimal place: `1234567` reads `1,234,567`, `1234.56` reads
/// `1,234.6`.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;

    // Round to one decimal up front so the carry (e.g. 999.96 -> 1,000)
    // lands in the integer part.
    let abs = (value.abs() * 10.0).round() / 10.0;
    let int_part = abs.trunc() as i64;
    let frac_digit = ((abs - abs.trunc()) * 10.0).round() as u8;

    let mut out = String::new();
    if negative && (int_part != 0 || frac_digit != 0) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if frac_digit != 0 {
        out.push('.');
        out.push_str(&frac_digit.to_string());
    }
    out
}

/// Format a series date as e.g. `28 May 2020`.
pub fn format_date(date: SeriesDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Format one cell of a merged row for the given field.
///
/// Date fields render the row's date; numeric fields look up the
/// field's column and render the value, or an empty string when the
/// value is absent; text fields render the raw column value without
/// separators.
pub fn format_cell(field: &MetricField, row: &MergedRow) -> String {
    match field.field_type {
        FieldType::Date => format_date(row.date),
        FieldType::Numeric => row
            .columns
            .get(&field.value)
            .copied()
            .flatten()
            .map(format_number)
            .unwrap_or_default(),
        FieldType::Text => row
            .columns
            .get(&field.value)
            .copied()
            .flatten()
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

/// Insert a comma between each group of three digits.
fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn integers_group_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(3_090_566.0), "3,090,566");
    }

    #[test]
    fn fractional_values_keep_one_decimal() {
        assert_eq!(format_number(1234.56), "1,234.6");
        assert_eq!(format_number(3.45), "3.5");
    }

    #[test]
    fn rounding_carry_reaches_the_integer_part() {
        assert_eq!(format_number(999.96), "1,000");
    }

    #[test]
    fn negative_values_keep_the_sign() {
        assert_eq!(format_number(-1234.0), "-1,234");
    }

    #[test]
    fn dates_render_day_month_year() {
        let date = NaiveDate::parse_from_str("2020-05-28", "%Y-%m-%d").unwrap();
        assert_eq!(format_date(date), "28 May 2020");

        let date = NaiveDate::parse_from_str("2020-04-01", "%Y-%m-%d").unwrap();
        assert_eq!(format_date(date), "1 Apr 2020");
    }

    #[test]
    fn cell_formatting_follows_field_type() {
        let date = NaiveDate::parse_from_str("2020-04-01", "%Y-%m-%d").unwrap();
        let mut columns = BTreeMap::new();
        columns.insert("Englandcases".to_string(), Some(1234.0));
        columns.insert("Walescases".to_string(), None);
        let row = MergedRow { date, columns };

        let date_field = MetricField::date("date", "Date");
        assert_eq!(format_cell(&date_field, &row), "1 Apr 2020");

        let cases = MetricField::numeric("Englandcases", "England Cases");
        assert_eq!(format_cell(&cases, &row), "1,234");

        let absent = MetricField::numeric("Walescases", "Wales Cases");
        assert_eq!(format_cell(&absent, &row), "");
    }
}
