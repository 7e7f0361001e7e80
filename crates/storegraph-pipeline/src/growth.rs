//! Period-over-period growth series

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storegraph_common::Period;
use storegraph_config::GrowthSpec;
use tracing::{debug, instrument};

/// One (group, period, value) observation fed into the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthInput {
    pub group: String,
    pub period: Period,
    pub value: f64,
}

/// One point of the computed growth series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub group: String,
    pub period: Period,
    /// Metric value at this period (cumulative when configured)
    pub value: f64,
    /// Percent change against the previous period of the same group;
    /// None for the first period and when the previous value is zero
    pub pct_change: Option<f64>,
    /// Whether the change clears the configured threshold
    pub highlight: bool,
}

/// Compute the growth series per group, periods ascending.
///
/// Growth is never computed across groups. A previous value of exactly
/// zero yields None rather than an infinite rate.
#[instrument(skip(points))]
pub fn compute(points: Vec<GrowthInput>, spec: &GrowthSpec) -> Vec<GrowthPoint> {
    let mut by_group: BTreeMap<String, Vec<(Period, f64)>> = BTreeMap::new();
    for point in points {
        by_group
            .entry(point.group)
            .or_default()
            .push((point.period, point.value));
    }

    let mut series = Vec::new();
    for (group, mut observations) in by_group {
        observations.sort_by_key(|(period, _)| *period);

        if spec.cumulative {
            let mut running = 0.0;
            for (_, value) in observations.iter_mut() {
                running += *value;
                *value = running;
            }
        }

        let mut previous: Option<f64> = None;
        for (period, value) in observations {
            let pct_change = match previous {
                None => None,
                Some(prev) if prev == 0.0 => None,
                Some(prev) => Some((value - prev) / prev * 100.0),
            };
            let highlight = matches!(
                (pct_change, spec.highlight_above_pct),
                (Some(change), Some(threshold)) if change > threshold
            );
            series.push(GrowthPoint {
                group: group.clone(),
                period,
                value,
                pct_change,
                highlight,
            });
            previous = Some(value);
        }
    }

    debug!(points = series.len(), cumulative = spec.cumulative, "Computed growth series");
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(cumulative: bool, highlight_above_pct: Option<f64>) -> GrowthSpec {
        GrowthSpec {
            metric: "Monthly_Installs".to_string(),
            cumulative,
            highlight_above_pct,
        }
    }

    fn inputs(values: &[(&str, (i32, u32), f64)]) -> Vec<GrowthInput> {
        values
            .iter()
            .map(|(group, (year, month), value)| GrowthInput {
                group: group.to_string(),
                period: Period::new(*year, *month),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_basic_growth_series() {
        let points = inputs(&[
            ("A", (2018, 1), 100.0),
            ("A", (2018, 2), 150.0),
            ("A", (2018, 3), 90.0),
        ]);

        let series = compute(points, &spec(false, None));
        let changes: Vec<Option<f64>> = series.iter().map(|p| p.pct_change).collect();
        assert_eq!(changes, vec![None, Some(50.0), Some(-40.0)]);
    }

    #[test]
    fn test_zero_previous_value_guard() {
        let points = inputs(&[("A", (2018, 1), 0.0), ("A", (2018, 2), 50.0)]);

        let series = compute(points, &spec(false, None));
        let changes: Vec<Option<f64>> = series.iter().map(|p| p.pct_change).collect();
        assert_eq!(changes, vec![None, None]);
    }

    #[test]
    fn test_growth_never_crosses_groups() {
        let points = inputs(&[
            ("A", (2018, 1), 100.0),
            ("B", (2018, 2), 300.0),
            ("A", (2018, 2), 200.0),
        ]);

        let series = compute(points, &spec(false, None));
        let a: Vec<_> = series.iter().filter(|p| p.group == "A").collect();
        let b: Vec<_> = series.iter().filter(|p| p.group == "B").collect();

        assert_eq!(a[0].pct_change, None);
        assert_eq!(a[1].pct_change, Some(100.0));
        // B's single period has no predecessor, regardless of A's points
        assert_eq!(b[0].pct_change, None);
    }

    #[test]
    fn test_periods_are_sorted_within_group() {
        let points = inputs(&[
            ("A", (2018, 3), 90.0),
            ("A", (2018, 1), 100.0),
            ("A", (2018, 2), 150.0),
        ]);

        let series = compute(points, &spec(false, None));
        let months: Vec<u32> = series.iter().map(|p| p.period.month).collect();
        assert_eq!(months, vec![1, 2, 3]);
        assert_eq!(series[2].pct_change, Some(-40.0));
    }

    #[test]
    fn test_cumulative_mode() {
        let points = inputs(&[
            ("A", (2018, 1), 100.0),
            ("A", (2018, 2), 50.0),
            ("A", (2018, 3), 75.0),
        ]);

        let series = compute(points, &spec(true, None));
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 150.0, 225.0]);
        assert_eq!(series[1].pct_change, Some(50.0));
        assert_eq!(series[2].pct_change, Some(50.0));
    }

    #[test]
    fn test_highlight_threshold() {
        let points = inputs(&[
            ("A", (2018, 1), 100.0),
            ("A", (2018, 2), 130.0),
            ("A", (2018, 3), 140.0),
        ]);

        let series = compute(points, &spec(false, Some(20.0)));
        let flags: Vec<bool> = series.iter().map(|p| p.highlight).collect();
        // +30% clears the 20% threshold, +7.7% does not
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_empty_input() {
        let series = compute(Vec::new(), &spec(false, None));
        assert!(series.is_empty());
    }
}
