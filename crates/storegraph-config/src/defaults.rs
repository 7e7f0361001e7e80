//! Built-in scenario definitions
//!
//! The six stock analysis scenarios, expressed purely as configuration
//! data. Filter literals, rank limits, growth thresholds, translation
//! tables, and gate windows are carried over verbatim from the dashboard
//! they were commissioned for.

use crate::settings::{
    CompareOp, CompareRule, Config, DatasetConfig, Field, FilterRule, GateConfig, GroupColumn,
    GroupField, GrowthSpec, HighlightRule, LoggingConfig, MetricSpec, RankSpec, Reduction,
    RuleValue, ScenarioConfig, TopGroupsSpec,
};
use std::collections::BTreeMap;

fn compare(field: Field, op: CompareOp, value: RuleValue) -> FilterRule {
    FilterRule::Compare(CompareRule::new(field, op, value))
}

fn number(n: f64) -> RuleValue {
    RuleValue::Number(n)
}

fn text(s: &str) -> RuleValue {
    RuleValue::Text(s.to_string())
}

fn list(items: &[&str]) -> RuleValue {
    RuleValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn translations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Top 10 categories by installs: average rating vs total reviews
pub fn top_categories() -> ScenarioConfig {
    ScenarioConfig {
        name: "top-categories".to_string(),
        description: "Top 10 app categories by installs with average rating and total reviews"
            .to_string(),
        filter: vec![
            compare(Field::Rating, CompareOp::Gte, number(4.0)),
            compare(Field::SizeMb, CompareOp::Gte, number(10.0)),
            compare(Field::UpdatedMonth, CompareOp::Eq, number(1.0)),
        ],
        top_groups: None,
        group_by: vec![GroupField::Column(GroupColumn::Category)],
        metrics: vec![
            MetricSpec::new("Avg_Rating", Field::Rating, Reduction::Mean),
            MetricSpec::new("Total_Reviews", Field::Reviews, Reduction::Sum),
            MetricSpec::new("Total_Installs", Field::Installs, Reduction::Sum),
        ],
        record_columns: vec![],
        rank: Some(RankSpec {
            metric: "Total_Installs".to_string(),
            limit: 10,
        }),
        growth: None,
        highlight: None,
        translations: BTreeMap::new(),
        gate: GateConfig::window("15:00", "17:00"),
    }
}

/// Average installs and revenue of free vs paid apps in the top 3 categories
pub fn free_vs_paid() -> ScenarioConfig {
    ScenarioConfig {
        name: "free-vs-paid".to_string(),
        description: "Average installs vs revenue for free and paid apps in the top 3 categories"
            .to_string(),
        filter: vec![
            compare(Field::Installs, CompareOp::Gte, number(10_000.0)),
            FilterRule::AnyOf {
                any_of: vec![
                    vec![
                        CompareRule::new(Field::AppType, CompareOp::Eq, text("Paid")),
                        CompareRule::new(Field::Revenue, CompareOp::Gte, number(10_000.0)),
                    ],
                    vec![CompareRule::new(Field::AppType, CompareOp::Eq, text("Free"))],
                ],
            },
            compare(Field::AndroidVersion, CompareOp::Gt, number(4.0)),
            compare(Field::SizeMb, CompareOp::Gt, number(15.0)),
            compare(Field::ContentRating, CompareOp::Eq, text("Everyone")),
            compare(Field::NameLength, CompareOp::Lte, number(30.0)),
        ],
        top_groups: Some(TopGroupsSpec {
            by: GroupColumn::Category,
            field: Field::Installs,
            limit: 3,
        }),
        group_by: vec![
            GroupField::Column(GroupColumn::Category),
            GroupField::Column(GroupColumn::AppType),
        ],
        metrics: vec![
            MetricSpec::new("Avg_Installs", Field::Installs, Reduction::Mean),
            MetricSpec::new("Avg_Revenue", Field::Revenue, Reduction::Mean),
        ],
        record_columns: vec![],
        rank: None,
        growth: None,
        highlight: None,
        translations: BTreeMap::new(),
        gate: GateConfig::window("13:00", "14:00"),
    }
}

/// Total installs of the top 5 categories on a country map
pub fn category_map() -> ScenarioConfig {
    ScenarioConfig {
        name: "category-map".to_string(),
        description: "Total installs by country and category for the top 5 categories".to_string(),
        filter: vec![compare(
            Field::Category,
            CompareOp::NotStartsWithAny,
            list(&["A", "C", "G", "S"]),
        )],
        top_groups: Some(TopGroupsSpec {
            by: GroupColumn::Category,
            field: Field::Installs,
            limit: 5,
        }),
        group_by: vec![
            GroupField::Constant {
                name: "Country".to_string(),
                value: "India".to_string(),
            },
            GroupField::Column(GroupColumn::Category),
        ],
        metrics: vec![MetricSpec::new(
            "Total_Installs",
            Field::Installs,
            Reduction::Sum,
        )],
        record_columns: vec![],
        rank: None,
        growth: None,
        highlight: Some(HighlightRule::MetricAbove {
            metric: "Total_Installs".to_string(),
            threshold: 1_000_000.0,
        }),
        translations: BTreeMap::new(),
        gate: GateConfig::window("18:00", "20:00"),
    }
}

/// Cumulative monthly installs by category with month-over-month growth
pub fn cumulative_installs() -> ScenarioConfig {
    ScenarioConfig {
        name: "cumulative-installs".to_string(),
        description: "Cumulative installs over time for T/P categories, highlighting fast months"
            .to_string(),
        filter: vec![
            compare(Field::Name, CompareOp::NotMatches, text(r"\d")),
            compare(Field::Rating, CompareOp::Gte, number(4.2)),
            compare(Field::Reviews, CompareOp::Gt, number(1_000.0)),
            compare(Field::SizeMb, CompareOp::Gte, number(20.0)),
            compare(Field::SizeMb, CompareOp::Lte, number(80.0)),
            compare(Field::Category, CompareOp::StartsWithAny, list(&["T", "P"])),
        ],
        top_groups: None,
        group_by: vec![
            GroupField::Column(GroupColumn::Period),
            GroupField::Column(GroupColumn::Category),
        ],
        metrics: vec![MetricSpec::new(
            "Monthly_Installs",
            Field::Installs,
            Reduction::Sum,
        )],
        record_columns: vec![],
        rank: None,
        growth: Some(GrowthSpec {
            metric: "Monthly_Installs".to_string(),
            cumulative: true,
            highlight_above_pct: Some(25.0),
        }),
        highlight: None,
        translations: translations(&[
            ("Travel & Local", "Voyage et Local"),
            ("Productivity", "Productividad"),
            ("Photography", "写真"),
        ]),
        gate: GateConfig::window("10:00", "18:00"),
    }
}

/// App size vs rating bubble table for selected categories
pub fn size_vs_rating() -> ScenarioConfig {
    ScenarioConfig {
        name: "size-vs-rating".to_string(),
        description: "Filtered app listing of size, rating and installs for selected categories"
            .to_string(),
        filter: vec![
            compare(Field::Rating, CompareOp::Gt, number(3.5)),
            compare(Field::Reviews, CompareOp::Gt, number(500.0)),
            compare(Field::Installs, CompareOp::Gt, number(50_000.0)),
            // drops the rows whose size never parsed
            compare(Field::SizeMb, CompareOp::Gte, number(0.0)),
            compare(
                Field::Category,
                CompareOp::In,
                list(&[
                    "GAME",
                    "BEAUTY",
                    "BUSINESS",
                    "COMICS",
                    "COMMUNICATION",
                    "DATING",
                    "ENTERTAINMENT",
                    "SOCIAL",
                    "EVENTS",
                ]),
            ),
        ],
        top_groups: None,
        group_by: vec![],
        metrics: vec![],
        record_columns: vec![
            Field::Name,
            Field::Category,
            Field::SizeMb,
            Field::Rating,
            Field::Installs,
        ],
        rank: None,
        growth: None,
        highlight: Some(HighlightRule::KeyEquals {
            column: "Category".to_string(),
            value: "GAME".to_string(),
        }),
        translations: translations(&[
            ("BEAUTY", "सौंदर्य"),
            ("BUSINESS", "வணிகம்"),
            ("DATING", "Dating (Deutsch)"),
        ]),
        gate: GateConfig {
            start: "15:00".to_string(),
            end: "19:00".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            force_visible: true,
        },
    }
}

/// Monthly installs time series by category with growth highlighting
pub fn monthly_growth() -> ScenarioConfig {
    ScenarioConfig {
        name: "monthly-growth".to_string(),
        description: "Monthly installs by E/C/B categories with month-over-month growth"
            .to_string(),
        filter: vec![
            compare(Field::Reviews, CompareOp::Gt, number(500.0)),
            compare(
                Field::Name,
                CompareOp::NotStartsWithAny,
                list(&["X", "Y", "Z"]),
            ),
            compare(Field::Name, CompareOp::NotMatches, text("(?i)s")),
            compare(
                Field::Category,
                CompareOp::StartsWithAny,
                list(&["E", "C", "B"]),
            ),
        ],
        top_groups: None,
        group_by: vec![
            GroupField::Column(GroupColumn::Period),
            GroupField::Column(GroupColumn::Category),
        ],
        metrics: vec![MetricSpec::new(
            "Monthly_Installs",
            Field::Installs,
            Reduction::Sum,
        )],
        record_columns: vec![],
        rank: None,
        growth: Some(GrowthSpec {
            metric: "Monthly_Installs".to_string(),
            cumulative: false,
            highlight_above_pct: Some(20.0),
        }),
        highlight: None,
        translations: translations(&[
            ("Beauty", "सौंदर्य"),
            ("Business", "வணிகம்"),
            ("Dating", "Dating (Deutsch)"),
        ]),
        gate: GateConfig::window("18:00", "21:00"),
    }
}

/// All built-in scenarios in their shipping order
pub fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        top_categories(),
        free_vs_paid(),
        category_map(),
        cumulative_installs(),
        size_vs_rating(),
        monthly_growth(),
    ]
}

/// Default configuration: dataset conventions plus the six stock scenarios
pub fn default_config() -> Config {
    Config {
        dataset: DatasetConfig::default(),
        logging: LoggingConfig::default(),
        scenarios: default_scenarios(),
    }
}
