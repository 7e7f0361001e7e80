//! CLI entry point for storegraph
//!
//! Loads the configuration (built-in scenarios unless a file overrides
//! them), cleans the dataset once, and runs the requested scenarios. A
//! scenario whose display gate is closed prints its fixed message instead
//! of rendering; fatal errors print a single message and exit non-zero.

mod output;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storegraph_common::logging::{init_logging, LoggingConfig};
use storegraph_config::{Config, ConfigLoader, ScenarioConfig};
use storegraph_pipeline::{GateDecision, ScenarioRunner, TableRenderer};
use tracing::info;

#[derive(Parser)]
#[command(name = "storegraph")]
#[command(about = "Scenario-driven analytics over app store datasets", long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scenario, or all of them, against the dataset
    Run {
        /// Scenario name; omit to run every configured scenario
        scenario: Option<String>,

        /// Dataset path override
        #[arg(short, long)]
        dataset: Option<String>,

        /// Render even when the display window is closed
        #[arg(long)]
        force_visible: bool,

        /// Output format for finished tables
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// File to append tables to; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the configured scenarios and their display windows
    List,
    /// Validate the configuration and dataset, then exit
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("storegraph: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => ConfigLoader::load()?,
    };

    init_logging(LoggingConfig {
        level: config.logging.level.clone(),
        file_path: config.logging.file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Run {
            scenario,
            dataset,
            force_visible,
            format,
            output,
        } => run_scenarios(&config, scenario.as_deref(), dataset, force_visible, format, output),
        Commands::List => list_scenarios(&config),
        Commands::Check => check(&config),
    }
}

fn run_scenarios(
    config: &Config,
    scenario: Option<&str>,
    dataset: Option<String>,
    force_visible: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut dataset_config = config.dataset.clone();
    if let Some(path) = dataset {
        dataset_config.path = path;
    }

    let records = storegraph_pipeline::load_dataset(&dataset_config)?;

    let scenarios: Vec<&ScenarioConfig> = match scenario {
        Some(name) => vec![config
            .scenario(name)
            .ok_or_else(|| anyhow!("unknown scenario '{name}'"))?],
        None => config.scenarios.iter().collect(),
    };

    let sink: Box<dyn TableRenderer> = match format {
        OutputFormat::Json => Box::new(output::JsonSink::new(output)),
        OutputFormat::Csv => Box::new(output::CsvSink::new(output)),
    };

    for scenario in scenarios {
        let runner = ScenarioRunner::new(scenario)?;

        let decision = if force_visible {
            GateDecision {
                visible: true,
                message: None,
            }
        } else {
            runner.gate()?.decide_now()
        };

        if !decision.visible {
            println!(
                "[{}] {}",
                scenario.name,
                decision
                    .message
                    .unwrap_or_else(|| "Chart not available.".to_string())
            );
            continue;
        }

        let table = runner.run(&records)?;
        if table.is_empty() {
            println!(
                "[{}] No data available after applying filters.",
                scenario.name
            );
            continue;
        }

        sink.render(&table)?;
        info!(
            scenario = %scenario.name,
            rows = table.rows.len(),
            sink = sink.name(),
            "Rendered scenario table"
        );
    }

    Ok(())
}

fn list_scenarios(config: &Config) -> Result<()> {
    for scenario in &config.scenarios {
        println!(
            "{:<24} {}-{} {}  {}",
            scenario.name,
            scenario.gate.start,
            scenario.gate.end,
            scenario.gate.timezone,
            scenario.description
        );
    }
    Ok(())
}

fn check(config: &Config) -> Result<()> {
    // Config was validated on load; compile every filter and gate, then
    // make sure the dataset is present and well-formed.
    for scenario in &config.scenarios {
        let runner = ScenarioRunner::new(scenario)
            .with_context(|| format!("scenario '{}'", scenario.name))?;
        runner
            .gate()
            .with_context(|| format!("scenario '{}'", scenario.name))?;
    }

    let records = storegraph_pipeline::load_dataset(&config.dataset)?;
    println!(
        "OK: {} scenarios, {} dataset rows ({})",
        config.scenarios.len(),
        records.len(),
        config.dataset.path
    );
    Ok(())
}
