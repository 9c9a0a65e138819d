//! Plain-text renderer for terminal output.

use covdash_core::field::MetricField;
use covdash_core::format::format_cell;
use covdash_core::row::{CategoryRow, MergedRow};
use covdash_dashboard::{BarMode, Renderer};

/// Renders shaped rows as tab-separated text.
pub struct TextRenderer;

impl TextRenderer {
    fn header(fields: &[MetricField]) -> String {
        fields
            .iter()
            .map(|f| f.label.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    /// Charts degrade to the same tabular text in a terminal.
    fn chart(
        &self,
        fields: &[MetricField],
        series: &[MergedRow],
        _bar_mode: Option<BarMode>,
    ) -> String {
        self.table(fields, series)
    }

    fn table(&self, fields: &[MetricField], series: &[MergedRow]) -> String {
        let mut out = Self::header(fields);
        for row in series {
            out.push('\n');
            let cells: Vec<String> = fields.iter().map(|f| format_cell(f, row)).collect();
            out.push_str(&cells.join("\t"));
        }
        out
    }

    fn breakdown_chart(
        &self,
        fields: &[MetricField],
        rows: &[CategoryRow],
        _bar_mode: Option<BarMode>,
    ) -> String {
        self.breakdown_table(fields, rows)
    }

    fn breakdown_table(&self, fields: &[MetricField], rows: &[CategoryRow]) -> String {
        let mut out = format!("Category\t{}", Self::header(fields));
        for row in rows {
            out.push('\n');
            out.push_str(&row.category);
            for field in fields {
                out.push('\t');
                if let Some(value) = row.columns.get(&field.value) {
                    out.push_str(&covdash_core::format::format_number(*value));
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    #[test]
    fn table_renders_header_and_formatted_cells() {
        let fields = vec![
            MetricField::date("date", "Date"),
            MetricField::numeric("Englandcases", "England Cases"),
        ];

        let date = NaiveDate::parse_from_str("2020-04-01", "%Y-%m-%d").unwrap();
        let mut columns = BTreeMap::new();
        columns.insert("Englandcases".to_string(), Some(1234.0));
        let series = vec![MergedRow { date, columns }];

        let out = TextRenderer.table(&fields, &series);
        assert_eq!(out, "Date\tEngland Cases\n1 Apr 2020\t1,234");
    }
}
