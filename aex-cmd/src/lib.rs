//! Command implementations for the export choropleth CLI.
//!
//! Every subcommand loads the metric table and the boundary names, resolves
//! the names against the table's entity keys, and reports on some part of
//! the resulting view.

use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod report;
pub mod session;
pub mod source;

/// Inputs shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Metric CSV (optionally .gz) with "Exports, Autos, <category>, <entity>, <unit>" columns
    #[arg(short = 'm', long)]
    pub metrics: PathBuf,

    /// Boundary attribute CSV (optionally .gz), one record per boundary feature
    #[arg(short = 'b', long)]
    pub boundaries: PathBuf,

    /// Boundary column holding the entity name
    #[arg(long, default_value = "ADMIN")]
    pub name_column: String,

    /// JSON config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Override the resolver's minimum similarity
    #[arg(long)]
    pub min_similarity: Option<f64>,

    /// Override the size of the top-K subset
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print how each boundary name resolves against the metric entities
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compute the map view and write it as JSON
    Map {
        #[command(flatten)]
        source: SourceArgs,

        /// Metric category (defaults to the first one)
        #[arg(long)]
        category: Option<String>,

        /// Metric unit, "USD m" or "% of total" (defaults to the first one)
        #[arg(short = 'u', long)]
        unit: Option<String>,

        /// Highlight the top-K entities
        #[arg(long)]
        highlight: bool,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Print the top-K entities for a metric
    Top {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        category: Option<String>,

        #[arg(short = 'u', long)]
        unit: Option<String>,
    },

    /// Export the time series of one entity as CSV
    Series {
        #[command(flatten)]
        source: SourceArgs,

        /// Boundary name of the entity
        #[arg(short = 'e', long)]
        entity: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(short = 'u', long)]
        unit: Option<String>,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Replay newline-delimited JSON selection events, writing one view per event
    Session {
        #[command(flatten)]
        source: SourceArgs,

        /// Event file (stdin if omitted)
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Resolve { source } => report::run_resolve(&source),
        Command::Map {
            source,
            category,
            unit,
            highlight,
            output,
        } => report::run_map(
            &source,
            category.as_deref(),
            unit.as_deref(),
            highlight,
            output.as_deref(),
        ),
        Command::Top {
            source,
            category,
            unit,
        } => report::run_top(&source, category.as_deref(), unit.as_deref()),
        Command::Series {
            source,
            entity,
            category,
            unit,
            output,
        } => report::run_series(
            &source,
            &entity,
            category.as_deref(),
            unit.as_deref(),
            output.as_deref(),
        ),
        Command::Session {
            source,
            events,
            output,
        } => session::run_session(&source, events.as_deref(), output.as_deref()),
    }
}
