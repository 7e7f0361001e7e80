//! # storegraph-pipeline
//!
//! The cleaning-and-aggregation core: dataset ingestion, field
//! normalization, declarative row filtering, group-by aggregation,
//! ranking, growth series, label translation, and the display gate.
//!
//! Data flows strictly one way: raw rows -> normalizer -> filter ->
//! aggregator -> ranker/growth -> translator -> render table. No stage
//! feeds back into an earlier one, and a run is one synchronous pass.

pub mod aggregator;
pub mod dataset;
pub mod fields;
pub mod filter;
pub mod gate;
pub mod growth;
pub mod normalizer;
pub mod ranker;
pub mod runner;
pub mod table;
pub mod traits;
pub mod translator;

pub use aggregator::{Aggregator, SummaryRow, SummaryTable};
pub use dataset::{load_records, RawRecord, REQUIRED_COLUMNS};
pub use filter::RowFilter;
pub use gate::{DisplayGate, GateDecision};
pub use growth::{GrowthInput, GrowthPoint};
pub use normalizer::Normalizer;
pub use runner::{load_dataset, run_scenario, ScenarioRunner};
pub use table::{CellValue, ColumnKind, RenderColumn, RenderTable};
pub use traits::TableRenderer;
pub use translator::LabelTranslator;
