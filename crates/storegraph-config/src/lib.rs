//! # storegraph-config
//!
//! Declarative scenario configuration for the storegraph analytics
//! pipeline: YAML-loadable settings with validation, environment
//! variable overrides, and the six built-in scenarios as defaults.

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    CompareOp, CompareRule, Config, DatasetConfig, Field, FilterRule, GateConfig, GroupColumn,
    GroupField, GrowthSpec, HighlightRule, LoggingConfig, MetricSpec, RankSpec, Reduction,
    RuleValue, ScenarioConfig, TopGroupsSpec,
};
