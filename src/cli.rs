use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Precipitation-concentration indices from gridded daily data.
#[derive(Parser)]
#[command(
    name = "wd50",
    version,
    about = "Annual precipitation-concentration indices, period comparison and trends"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build daily stacks and write one annual metrics record per water year.
    Metrics(MetricsArgs),
    /// Compare a metric between two periods of water years.
    Compare(CompareArgs),
    /// Test every cell of a metric for a monotonic trend.
    Trend(TrendArgs),
}

/// Arguments for the `metrics` subcommand.
#[derive(clap::Args)]
pub struct MetricsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wd50.toml")]
    pub config: PathBuf,

    /// Override the first water year from config.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Override the last water year from config.
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Override the annual record directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wd50.toml")]
    pub config: PathBuf,

    /// Override the metric from config.
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Override the JSON report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `trend` subcommand.
#[derive(clap::Args)]
pub struct TrendArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wd50.toml")]
    pub config: PathBuf,

    /// Override the metric from config.
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Override the first water year from config.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Override the last water year from config.
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Override the trend record path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
