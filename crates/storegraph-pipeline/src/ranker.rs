//! Ranking of summary rows and top-group pre-selection

use crate::aggregator::{Aggregator, SummaryTable};
use storegraph_common::{AppRecord, Result, StoregraphError};
use storegraph_config::{GroupField, MetricSpec, RankSpec, Reduction, TopGroupsSpec};
use tracing::{debug, instrument};

/// Sort a summary table by a metric, descending, and keep the first N.
///
/// The sort is stable, so ties keep their first-encountered order; rows
/// whose metric is None sort last. A limit of zero yields an empty table.
#[instrument(skip(table))]
pub fn rank(mut table: SummaryTable, spec: &RankSpec) -> Result<SummaryTable> {
    let index = table.metric_index(&spec.metric).ok_or_else(|| {
        StoregraphError::validation(format!("unknown ranking metric '{}'", spec.metric))
    })?;

    table.rows.sort_by(|a, b| {
        let a = a.values[index].unwrap_or(f64::NEG_INFINITY);
        let b = b.values[index].unwrap_or(f64::NEG_INFINITY);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });
    table.rows.truncate(spec.limit);

    debug!(kept = table.rows.len(), metric = %spec.metric, "Ranked summary rows");
    Ok(table)
}

/// The top-N group keys by a summed field, used to restrict records
/// before the final aggregation ("top 3 categories by installs")
#[instrument(skip(records))]
pub fn top_group_keys(records: &[&AppRecord], spec: &TopGroupsSpec) -> Result<Vec<String>> {
    let group_by = [GroupField::Column(spec.by)];
    let metrics = [MetricSpec::new("Total", spec.field, Reduction::Sum)];

    let summary = Aggregator::new(&group_by, &metrics).aggregate(records);
    let ranked = rank(
        summary,
        &RankSpec {
            metric: "Total".to_string(),
            limit: spec.limit,
        },
    )?;

    Ok(ranked
        .rows
        .into_iter()
        .map(|row| row.keys.into_iter().next().unwrap_or_default())
        .collect())
}
