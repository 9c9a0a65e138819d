//! Tab views: the glue between a declarative field/filter set, the
//! query layer, the shapers, and an opaque renderer.
//!
//! Each view knows how to build its [`DataQuery`], how to shape the
//! raw rows that come back, and which renderer entry point the shaped
//! rows feed. The renderer itself (chart or table) is a collaborator
//! behind the [`Renderer`] trait.

use std::collections::BTreeMap;

use covdash_client::DataQuery;
use covdash_core::breakdown::merge_category_breakdown;
use covdash_core::field::{validate_fields, FieldType, MetricField};
use covdash_core::filter::FilterParam;
use covdash_core::row::{AreaRow, CategoryEntry, CategoryRow, MergedRow};
use covdash_core::series::{area_names, drop_leading_zeros, expand_area_fields, merge_area_series};
use covdash_core::CoreError;

/// Bar layout hint for chart renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    Stack,
    Group,
}

/// Which renderer entry point a tab feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Chart { bar_mode: Option<BarMode> },
    Table,
}

/// Opaque chart/table collaborator.
///
/// Consumes `{ fields, shaped rows }` and produces a visual; the
/// pipeline makes no assumption about the output beyond carrying it
/// back to the caller.
pub trait Renderer {
    type Output;

    fn chart(
        &self,
        fields: &[MetricField],
        series: &[MergedRow],
        bar_mode: Option<BarMode>,
    ) -> Self::Output;

    fn table(&self, fields: &[MetricField], series: &[MergedRow]) -> Self::Output;

    fn breakdown_chart(
        &self,
        fields: &[MetricField],
        rows: &[CategoryRow],
        bar_mode: Option<BarMode>,
    ) -> Self::Output;

    fn breakdown_table(&self, fields: &[MetricField], rows: &[CategoryRow]) -> Self::Output;
}

// ---------------------------------------------------------------------------
// MetricTabView
// ---------------------------------------------------------------------------

/// A single-area tab: declared metrics for one location over time.
pub struct MetricTabView {
    fields: Vec<MetricField>,
    filters: Vec<FilterParam>,
    kind: TabKind,
}

impl MetricTabView {
    /// Declare a view. The field list is validated up front; duplicate
    /// or empty field sets are configuration mistakes.
    pub fn new(
        fields: Vec<MetricField>,
        filters: Vec<FilterParam>,
        kind: TabKind,
    ) -> Result<Self, CoreError> {
        validate_fields(&fields)?;
        Ok(Self {
            fields,
            filters,
            kind,
        })
    }

    pub fn fields(&self) -> &[MetricField] {
        &self.fields
    }

    /// Build the query: `date` plus every declared field, projected
    /// under their own names.
    pub fn query(&self) -> DataQuery {
        let mut query = DataQuery::new(self.filters.clone()).with_field("date");
        for field in &self.fields {
            query = query.with_field(field.value.clone());
        }
        query
    }

    /// Shape and render fetched rows.
    ///
    /// Single-area responses carry no `areaName`, so the merged columns
    /// keep the bare metric names the declared fields reference.
    pub fn render<R: Renderer>(&self, rows: &[AreaRow], renderer: &R) -> R::Output {
        let series = merge_area_series(rows, &self.fields);
        match self.kind {
            TabKind::Chart { bar_mode } => renderer.chart(&self.fields, &series, bar_mode),
            TabKind::Table => renderer.table(&self.fields, &series),
        }
    }
}

// ---------------------------------------------------------------------------
// MultiAreaTabView
// ---------------------------------------------------------------------------

/// A tab comparing the same metrics across several areas.
pub struct MultiAreaTabView {
    fields: Vec<MetricField>,
    filters: Vec<FilterParam>,
    colours: Option<Vec<usize>>,
    kind: TabKind,
}

impl MultiAreaTabView {
    pub fn new(
        fields: Vec<MetricField>,
        filters: Vec<FilterParam>,
        kind: TabKind,
    ) -> Result<Self, CoreError> {
        validate_fields(&fields)?;
        Ok(Self {
            fields,
            filters,
            colours: None,
            kind,
        })
    }

    /// Palette indices handed out to areas in ascending area order.
    pub fn with_colours(mut self, colours: Vec<usize>) -> Self {
        self.colours = Some(colours);
        self
    }

    /// Build the query: `date`, `areaName` and every declared field.
    pub fn query(&self) -> DataQuery {
        let mut query = DataQuery::new(self.filters.clone())
            .with_field("date")
            .with_field("areaName");
        for field in &self.fields {
            query = query.with_field(field.value.clone());
        }
        query
    }

    /// Shape fetched rows into area-namespaced fields and merged series.
    ///
    /// Leading all-zero dates are dropped before merging. The expanded
    /// field list derives from the areas present in the unfiltered
    /// response, and tables get an explicit leading date column where
    /// charts carry the date on the x axis.
    pub fn shape(&self, rows: &[AreaRow]) -> (Vec<MetricField>, Vec<MergedRow>) {
        let keys: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.field_type != FieldType::Date)
            .map(|f| f.value.as_str())
            .collect();

        let live = drop_leading_zeros(rows, &keys);
        let series = merge_area_series(&live, &self.fields);

        let areas = area_names(rows);
        let include_date = self.kind == TabKind::Table;
        let fields = expand_area_fields(&self.fields, &areas, self.colours.as_deref(), include_date);

        (fields, series)
    }

    pub fn render<R: Renderer>(&self, rows: &[AreaRow], renderer: &R) -> R::Output {
        let (fields, series) = self.shape(rows);
        match self.kind {
            TabKind::Chart { bar_mode } => renderer.chart(&fields, &series, bar_mode),
            TabKind::Table => renderer.table(&fields, &series),
        }
    }
}

// ---------------------------------------------------------------------------
// BreakdownTabView
// ---------------------------------------------------------------------------

/// A tab showing a category breakdown (e.g. cases by age band and sex).
///
/// The required metrics are assumed to share one category set and
/// value-field shape; that contract is the caller's to uphold.
pub struct BreakdownTabView {
    required_metrics: Vec<String>,
    group_key: String,
    value_keys: Vec<String>,
    fields: Vec<MetricField>,
    filters: Vec<FilterParam>,
    kind: TabKind,
}

impl BreakdownTabView {
    pub fn new(
        required_metrics: Vec<String>,
        group_key: impl Into<String>,
        value_keys: Vec<String>,
        fields: Vec<MetricField>,
        filters: Vec<FilterParam>,
        kind: TabKind,
    ) -> Result<Self, CoreError> {
        if required_metrics.is_empty() {
            return Err(CoreError::Validation(
                "a breakdown view needs at least one required metric".into(),
            ));
        }

        Ok(Self {
            required_metrics,
            group_key: group_key.into(),
            value_keys,
            fields,
            filters,
            kind,
        })
    }

    /// Category field name in the raw payload, e.g. `"age"`.
    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    /// Value fields to keep from each category item.
    pub fn value_keys(&self) -> Vec<&str> {
        self.value_keys.iter().map(String::as_str).collect()
    }

    /// Build the query: each required metric projected under its own
    /// name, restricted to the latest record carrying the first one.
    pub fn query(&self) -> DataQuery {
        let mut query = DataQuery::new(self.filters.clone());
        for metric in &self.required_metrics {
            query = query.with_field(metric.clone());
        }
        query.with_latest_by(self.required_metrics[0].clone())
    }

    /// Merge the per-metric breakdown into one row per category.
    pub fn shape(&self, input: &BTreeMap<String, Vec<CategoryEntry>>) -> Vec<CategoryRow> {
        merge_category_breakdown(input)
    }

    pub fn render<R: Renderer>(
        &self,
        input: &BTreeMap<String, Vec<CategoryEntry>>,
        renderer: &R,
    ) -> R::Output {
        let rows = self.shape(input);
        match self.kind {
            TabKind::Chart { bar_mode } => renderer.breakdown_chart(&self.fields, &rows, bar_mode),
            TabKind::Table => renderer.breakdown_table(&self.fields, &rows),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
