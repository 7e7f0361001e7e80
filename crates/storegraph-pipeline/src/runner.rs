//! Scenario execution: wiring the pipeline stages per configuration
//!
//! A scenario run is one linear pass: filter the cleaned records, apply
//! the optional top-group pre-selection, aggregate (or project record
//! columns), rank or compute growth, translate category labels, and hand
//! back the finished [`RenderTable`]. An empty table is a valid result;
//! it is the "no data" signal, never an error.

use crate::aggregator::{self, Aggregator, SummaryRow, SummaryTable};
use crate::dataset;
use crate::fields;
use crate::filter::RowFilter;
use crate::gate::DisplayGate;
use crate::growth::{self, GrowthInput};
use crate::normalizer::Normalizer;
use crate::ranker;
use crate::table::{CellValue, RenderColumn, RenderTable};
use crate::translator::LabelTranslator;
use std::path::Path;
use storegraph_common::{AppRecord, Period, Result, StoregraphError};
use storegraph_config::{
    DatasetConfig, Field, GroupField, GrowthSpec, HighlightRule, ScenarioConfig,
};
use tracing::{debug, instrument};

/// Load and clean the configured dataset in one pass
#[instrument(skip(config))]
pub fn load_dataset(config: &DatasetConfig) -> Result<Vec<AppRecord>> {
    let raw = dataset::load_records(Path::new(&config.path))?;
    let normalizer = Normalizer::from_config(config);
    Ok(normalizer.normalize_all(&raw))
}

/// Runs one configured scenario against cleaned records
pub struct ScenarioRunner<'a> {
    config: &'a ScenarioConfig,
    filter: RowFilter,
    translator: LabelTranslator,
}

impl<'a> ScenarioRunner<'a> {
    /// Compile the scenario's filter rules; bad rule operands or regexes
    /// surface here as configuration errors
    pub fn new(config: &'a ScenarioConfig) -> Result<Self> {
        let filter = RowFilter::compile(&config.filter)?;
        let translator = LabelTranslator::new(config.translations.clone());
        Ok(Self {
            config,
            filter,
            translator,
        })
    }

    /// The scenario's display gate
    pub fn gate(&self) -> Result<DisplayGate> {
        DisplayGate::from_config(&self.config.gate)
    }

    /// Execute the full pipeline for this scenario
    #[instrument(skip(self, records), fields(scenario = %self.config.name))]
    pub fn run(&self, records: &[AppRecord]) -> Result<RenderTable> {
        let mut selected = self.filter.apply(records);

        if let Some(top) = &self.config.top_groups {
            let keys = ranker::top_group_keys(&selected, top)?;
            let by = GroupField::Column(top.by);
            selected.retain(|record| {
                aggregator::group_key(&by, record)
                    .map(|key| keys.contains(&key))
                    .unwrap_or(false)
            });
            debug!(
                groups = keys.len(),
                selected = selected.len(),
                "Restricted to top groups"
            );
        }

        if self.config.group_by.is_empty() {
            Ok(self.record_table(&selected))
        } else {
            self.summary_table(&selected)
        }
    }

    /// Filtered-records projection for scenarios without aggregation
    fn record_table(&self, records: &[&AppRecord]) -> RenderTable {
        let mut columns: Vec<RenderColumn> = self
            .config
            .record_columns
            .iter()
            .map(|field| {
                let name = fields::column_name(*field);
                if fields::is_textual(*field) {
                    RenderColumn::categorical(name)
                } else {
                    RenderColumn::numeric(name)
                }
            })
            .collect();
        if self.config.highlight.is_some() {
            columns.push(RenderColumn::flag("Highlight"));
        }

        let mut table = RenderTable::new(self.config.name.clone(), columns);
        for record in records {
            let mut row: Vec<CellValue> = self
                .config
                .record_columns
                .iter()
                .map(|field| self.record_cell(*field, record))
                .collect();
            if let Some(rule) = &self.config.highlight {
                row.push(CellValue::Flag(self.record_highlight(rule, record)));
            }
            table.push_row(row);
        }
        table
    }

    fn record_cell(&self, field: Field, record: &AppRecord) -> CellValue {
        if fields::is_textual(field) {
            match fields::text(field, record) {
                Some(value) if field == Field::Category => {
                    CellValue::Text(self.translator.translate_owned(value))
                }
                Some(value) => CellValue::Text(value.to_string()),
                None => CellValue::Null,
            }
        } else {
            CellValue::from_option(fields::numeric(field, record))
        }
    }

    /// Highlight rules reference raw field values, not translated labels
    fn record_highlight(&self, rule: &HighlightRule, record: &AppRecord) -> bool {
        match rule {
            HighlightRule::KeyEquals { column, value } => self
                .config
                .record_columns
                .iter()
                .find(|field| fields::column_name(**field) == column)
                .and_then(|field| fields::text(*field, record))
                .map(|v| v == value)
                .unwrap_or(false),
            HighlightRule::MetricAbove { .. } => false,
        }
    }

    /// Aggregation path: group, reduce, then rank or compute growth
    fn summary_table(&self, records: &[&AppRecord]) -> Result<RenderTable> {
        let aggregator = Aggregator::new(&self.config.group_by, &self.config.metrics);
        let summary = aggregator.aggregate(records);

        if let Some(growth_spec) = &self.config.growth {
            return self.growth_table(summary, growth_spec);
        }

        let summary = match &self.config.rank {
            Some(rank_spec) => ranker::rank(summary, rank_spec)?,
            None => summary,
        };

        let mut columns: Vec<RenderColumn> = summary
            .key_columns
            .iter()
            .map(|name| RenderColumn::categorical(name.clone()))
            .collect();
        columns.extend(
            summary
                .metric_columns
                .iter()
                .map(|name| RenderColumn::numeric(name.clone())),
        );
        if self.config.highlight.is_some() {
            columns.push(RenderColumn::flag("Highlight"));
        }

        let mut table = RenderTable::new(self.config.name.clone(), columns);
        for row in &summary.rows {
            let mut cells: Vec<CellValue> = row
                .keys
                .iter()
                .map(|key| CellValue::Text(self.translator.translate_owned(key)))
                .collect();
            cells.extend(row.values.iter().map(|v| CellValue::from_option(*v)));
            if let Some(rule) = &self.config.highlight {
                cells.push(CellValue::Flag(self.summary_highlight(rule, &summary, row)));
            }
            table.push_row(cells);
        }
        Ok(table)
    }

    fn summary_highlight(
        &self,
        rule: &HighlightRule,
        summary: &SummaryTable,
        row: &SummaryRow,
    ) -> bool {
        match rule {
            HighlightRule::MetricAbove { metric, threshold } => summary
                .metric_index(metric)
                .and_then(|index| row.values[index])
                .map(|value| value > *threshold)
                .unwrap_or(false),
            HighlightRule::KeyEquals { column, value } => summary
                .key_columns
                .iter()
                .position(|c| c == column)
                .map(|index| row.keys[index] == *value)
                .unwrap_or(false),
        }
    }

    /// Growth path: per-group period series over the aggregated metric
    fn growth_table(&self, summary: SummaryTable, spec: &GrowthSpec) -> Result<RenderTable> {
        let metric_index = summary.metric_index(&spec.metric).ok_or_else(|| {
            StoregraphError::validation(format!("unknown growth metric '{}'", spec.metric))
        })?;
        let period_index = self
            .config
            .group_by
            .iter()
            .position(GroupField::is_period)
            .ok_or_else(|| {
                StoregraphError::validation("growth requires grouping by period")
            })?;
        let group_index = (0..self.config.group_by.len()).find(|i| *i != period_index);

        let mut inputs = Vec::with_capacity(summary.rows.len());
        for row in &summary.rows {
            let period: Period = row.keys[period_index].parse()?;
            let group = group_index
                .map(|index| row.keys[index].clone())
                .unwrap_or_default();
            inputs.push(GrowthInput {
                group,
                period,
                value: row.values[metric_index].unwrap_or(0.0),
            });
        }

        let points = growth::compute(inputs, spec);

        let mut columns = vec![RenderColumn::categorical("Period")];
        if let Some(index) = group_index {
            columns.push(RenderColumn::categorical(summary.key_columns[index].clone()));
        }
        columns.push(RenderColumn::numeric(spec.metric.clone()));
        columns.push(RenderColumn::numeric("MoM_Growth"));
        if spec.highlight_above_pct.is_some() {
            columns.push(RenderColumn::flag("Highlight"));
        }

        let mut table = RenderTable::new(self.config.name.clone(), columns);
        for point in points {
            let mut cells = vec![CellValue::Text(point.period.to_string())];
            if group_index.is_some() {
                cells.push(CellValue::Text(self.translator.translate_owned(&point.group)));
            }
            cells.push(CellValue::Number(point.value));
            cells.push(CellValue::from_option(point.pct_change));
            if spec.highlight_above_pct.is_some() {
                cells.push(CellValue::Flag(point.highlight));
            }
            table.push_row(cells);
        }
        Ok(table)
    }
}

/// Convenience wrapper: compile and run a scenario in one call
pub fn run_scenario(config: &ScenarioConfig, records: &[AppRecord]) -> Result<RenderTable> {
    ScenarioRunner::new(config)?.run(records)
}
