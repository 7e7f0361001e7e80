//! Group-by aggregation of cleaned records into summary tables

use crate::fields;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storegraph_common::AppRecord;
use storegraph_config::{GroupColumn, GroupField, MetricSpec, Reduction};
use tracing::{debug, instrument};

/// One aggregated row: group key values plus reduced metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub keys: Vec<String>,
    /// Aligned with [`SummaryTable::metric_columns`]; a mean over an
    /// empty or all-null group is None
    pub values: Vec<Option<f64>>,
}

/// Aggregation output: named key and metric columns plus rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub key_columns: Vec<String>,
    pub metric_columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metric_index(&self, name: &str) -> Option<usize> {
        self.metric_columns.iter().position(|c| c == name)
    }
}

/// Per-metric accumulator over the non-null values of a group
#[derive(Debug, Clone, Copy, Default)]
struct MetricAcc {
    sum: f64,
    count: u64,
}

impl MetricAcc {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn reduce(&self, reduction: Reduction) -> Option<f64> {
        match reduction {
            Reduction::Sum => Some(self.sum),
            Reduction::Count => Some(self.count as f64),
            Reduction::Mean => {
                if self.count == 0 {
                    None
                } else {
                    Some(self.sum / self.count as f64)
                }
            }
        }
    }
}

/// Grouping key value of one record for a single group field; None when
/// the grouping cell is null
pub fn group_key(field: &GroupField, record: &AppRecord) -> Option<String> {
    match field {
        GroupField::Column(GroupColumn::Category) => Some(record.category.clone()),
        GroupField::Column(GroupColumn::AppType) => {
            record.app_type.map(|t| t.as_str().to_string())
        }
        GroupField::Column(GroupColumn::Period) => record.period.map(|p| p.to_string()),
        GroupField::Constant { value, .. } => Some(value.clone()),
    }
}

/// Groups records by one or two key fields and reduces numeric columns
#[derive(Debug)]
pub struct Aggregator<'a> {
    group_by: &'a [GroupField],
    metrics: &'a [MetricSpec],
}

impl<'a> Aggregator<'a> {
    pub fn new(group_by: &'a [GroupField], metrics: &'a [MetricSpec]) -> Self {
        Self { group_by, metrics }
    }

    /// Key values for one record; None when any grouping cell is null,
    /// which excludes the record from aggregation entirely
    fn group_keys(&self, record: &AppRecord) -> Option<Vec<String>> {
        self.group_by
            .iter()
            .map(|field| group_key(field, record))
            .collect()
    }

    /// Produce one summary row per distinct key combination present in
    /// the input, sorted by key for deterministic output
    #[instrument(skip(self, records))]
    pub fn aggregate(&self, records: &[&AppRecord]) -> SummaryTable {
        let mut groups: HashMap<Vec<String>, Vec<MetricAcc>> = HashMap::new();

        for record in records {
            let Some(keys) = self.group_keys(record) else {
                continue;
            };
            let accs = groups
                .entry(keys)
                .or_insert_with(|| vec![MetricAcc::default(); self.metrics.len()]);
            for (acc, metric) in accs.iter_mut().zip(self.metrics) {
                if let Some(value) = fields::numeric(metric.field, record) {
                    acc.push(value);
                }
            }
        }

        let mut rows: Vec<SummaryRow> = groups
            .into_iter()
            .map(|(keys, accs)| SummaryRow {
                keys,
                values: accs
                    .iter()
                    .zip(self.metrics)
                    .map(|(acc, metric)| acc.reduce(metric.reduction))
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| a.keys.cmp(&b.keys));

        debug!(groups = rows.len(), "Aggregated summary rows");

        SummaryTable {
            key_columns: self
                .group_by
                .iter()
                .map(|f| f.column_name().to_string())
                .collect(),
            metric_columns: self.metrics.iter().map(|m| m.name.clone()).collect(),
            rows,
        }
    }
}
