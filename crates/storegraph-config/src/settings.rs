//! Application and scenario configuration structures
//!
//! A scenario is pure configuration data: a declarative filter rule set,
//! grouping keys, metric reductions, optional ranking/growth stages, a
//! translation table, and a display gate window. The six built-in
//! scenarios in [`crate::defaults`] are nothing but values of these types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storegraph_common::{Result, StoregraphError};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Source dataset settings
    #[validate]
    pub dataset: DatasetConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,

    /// Analysis scenarios, run independently against the same cleaned data
    #[validate]
    pub scenarios: Vec<ScenarioConfig>,
}

/// Source dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Path to the delimited dataset file
    #[validate(length(min = 1, message = "Dataset path cannot be empty"))]
    pub path: String,

    /// strftime format of the last-updated column
    #[validate(length(min = 1, message = "Date format cannot be empty"))]
    pub date_format: String,

    /// Default sentiment subjectivity when the optional column is absent
    #[validate(range(min = 0.0, max = 1.0, message = "Sentiment default must be between 0 and 1"))]
    pub sentiment_default: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "play_store_data.csv".to_string(),
            date_format: "%B %d, %Y".to_string(),
            sentiment_default: 0.6,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom = "crate::validation::validate_log_level")]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// A cleaned record field that filters, metrics, and record tables can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Category,
    ContentRating,
    AppType,
    Rating,
    Reviews,
    Installs,
    SizeMb,
    Price,
    Revenue,
    AndroidVersion,
    NameLength,
    SentimentSubjectivity,
    /// Calendar month number (1-12) of the last-updated date
    UpdatedMonth,
}

/// Comparison operators available to filter rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Gte,
    Gt,
    Lt,
    Lte,
    Eq,
    /// Case-insensitive prefix match against any of a list of prefixes
    StartsWithAny,
    NotStartsWithAny,
    /// Set membership against a list of exact values
    In,
    /// Regex absence: passes when the pattern does not occur in the field
    NotMatches,
}

/// Literal operand of a comparison rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One field comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRule {
    pub field: Field,
    pub op: CompareOp,
    pub value: RuleValue,
}

impl CompareRule {
    pub fn new(field: Field, op: CompareOp, value: RuleValue) -> Self {
        Self { field, op, value }
    }
}

/// A filter rule: either a single comparison or a disjunction of rule
/// groups ("Paid apps must clear a revenue floor, Free apps pass")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterRule {
    AnyOf { any_of: Vec<Vec<CompareRule>> },
    Compare(CompareRule),
}

/// A column records can be grouped by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupField {
    Column(GroupColumn),
    /// A configured constant column (e.g. Country = "India")
    Constant { name: String, value: String },
}

/// Record-backed grouping columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColumn {
    Category,
    AppType,
    Period,
}

impl GroupField {
    /// Column header this grouping key renders under
    pub fn column_name(&self) -> &str {
        match self {
            Self::Column(GroupColumn::Category) => "Category",
            Self::Column(GroupColumn::AppType) => "Type",
            Self::Column(GroupColumn::Period) => "Period",
            Self::Constant { name, .. } => name,
        }
    }

    pub fn is_period(&self) -> bool {
        matches!(self, Self::Column(GroupColumn::Period))
    }
}

/// Supported metric reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Sum,
    Mean,
    Count,
}

/// A named reduced metric over a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Output column name (e.g. "Total_Installs")
    pub name: String,
    pub field: Field,
    pub reduction: Reduction,
}

impl MetricSpec {
    pub fn new(name: impl Into<String>, field: Field, reduction: Reduction) -> Self {
        Self {
            name: name.into(),
            field,
            reduction,
        }
    }
}

/// Keep only the top-N summary rows by a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSpec {
    /// Metric column to order by, descending
    pub metric: String,
    /// Number of rows to keep; 0 yields an empty result
    pub limit: usize,
}

/// Restrict records to the top-N groups by a summed field before the
/// final aggregation (the "top 3 categories by installs" pre-selection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGroupsSpec {
    pub by: GroupColumn,
    pub field: Field,
    pub limit: usize,
}

/// Period-over-period growth stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSpec {
    /// Metric column the growth series is computed over
    pub metric: String,
    /// Sum values cumulatively per group before differencing
    #[serde(default)]
    pub cumulative: bool,
    /// Mark points whose growth exceeds this percentage
    #[serde(default)]
    pub highlight_above_pct: Option<f64>,
}

/// Optional highlight column rule for the output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRule {
    /// Flag rows whose metric exceeds a threshold
    MetricAbove { metric: String, threshold: f64 },
    /// Flag rows whose named column equals a value
    KeyEquals { column: String, value: String },
}

/// Display gate configuration: a wall-clock time-of-day window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GateConfig {
    /// Window start, inclusive (HH:MM)
    #[validate(regex(path = "crate::validation::TIME_OF_DAY_REGEX", message = "Start must be HH:MM"))]
    pub start: String,

    /// Window end, exclusive (HH:MM)
    #[validate(regex(path = "crate::validation::TIME_OF_DAY_REGEX", message = "End must be HH:MM"))]
    pub end: String,

    /// IANA timezone the window is defined in
    #[validate(custom = "crate::validation::validate_timezone")]
    pub timezone: String,

    /// Render regardless of the current time (debug override as config)
    #[serde(default)]
    pub force_visible: bool,
}

impl GateConfig {
    pub fn window(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            timezone: "Asia/Kolkata".to_string(),
            force_visible: false,
        }
    }
}

/// One analysis scenario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScenarioConfig {
    #[validate(length(min = 1, message = "Scenario name cannot be empty"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Conjunction of filter rules applied to cleaned records
    #[serde(default)]
    pub filter: Vec<FilterRule>,

    /// Optional top-N group pre-selection
    #[serde(default)]
    pub top_groups: Option<TopGroupsSpec>,

    /// One or two grouping fields; empty means a filtered-records table
    #[serde(default)]
    pub group_by: Vec<GroupField>,

    /// Reduced metrics (required when group_by is non-empty)
    #[serde(default)]
    pub metrics: Vec<MetricSpec>,

    /// Record fields projected when no aggregation is configured
    #[serde(default)]
    pub record_columns: Vec<Field>,

    #[serde(default)]
    pub rank: Option<RankSpec>,

    #[serde(default)]
    pub growth: Option<GrowthSpec>,

    #[serde(default)]
    pub highlight: Option<HighlightRule>,

    /// Category display label translations; unmapped keys pass through
    #[serde(default)]
    pub translations: BTreeMap<String, String>,

    #[validate]
    pub gate: GateConfig,
}

impl ScenarioConfig {
    fn metric_names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name.as_str()).collect()
    }

    /// Cross-field validation beyond what the derive covers
    pub fn validate_semantics(&self) -> Result<()> {
        let fail = |msg: String| {
            Err(StoregraphError::validation_field(msg, self.name.clone()))
        };

        if self.group_by.len() > 2 {
            return fail(format!(
                "scenario '{}' groups by {} fields; at most two are supported",
                self.name,
                self.group_by.len()
            ));
        }

        if self.group_by.is_empty() {
            if self.record_columns.is_empty() {
                return fail(format!(
                    "scenario '{}' has neither grouping fields nor record columns",
                    self.name
                ));
            }
            if !self.metrics.is_empty() || self.rank.is_some() || self.growth.is_some() {
                return fail(format!(
                    "scenario '{}' configures metrics without grouping fields",
                    self.name
                ));
            }
        } else if self.metrics.is_empty() {
            return fail(format!(
                "scenario '{}' groups records but defines no metrics",
                self.name
            ));
        }

        let names = self.metric_names();

        if let Some(rank) = &self.rank {
            if !names.contains(&rank.metric.as_str()) {
                return fail(format!(
                    "scenario '{}' ranks by unknown metric '{}'",
                    self.name, rank.metric
                ));
            }
        }

        if let Some(growth) = &self.growth {
            if !names.contains(&growth.metric.as_str()) {
                return fail(format!(
                    "scenario '{}' computes growth over unknown metric '{}'",
                    self.name, growth.metric
                ));
            }
            if !self.group_by.iter().any(GroupField::is_period) {
                return fail(format!(
                    "scenario '{}' computes growth but does not group by period",
                    self.name
                ));
            }
        }

        if let Some(HighlightRule::MetricAbove { metric, .. }) = &self.highlight {
            if !names.contains(&metric.as_str()) {
                return fail(format!(
                    "scenario '{}' highlights unknown metric '{}'",
                    self.name, metric
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        crate::defaults::default_config()
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        self.validate()
            .map_err(|e| StoregraphError::validation(e.to_string()))?;

        if self.scenarios.is_empty() {
            return Err(StoregraphError::validation(
                "configuration defines no scenarios",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(StoregraphError::validation(format!(
                    "duplicate scenario name '{}'",
                    scenario.name
                )));
            }
            scenario.validate_semantics()?;
        }

        Ok(())
    }

    /// Look up a scenario by name
    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}
