mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::scenarios::{AnalyzeArgs, CatalogArgs, SalePercentageArgs};
use commands::tax::TaxImpactArgs;

/// Exit valuation scenarios with tax impact
#[derive(Parser)]
#[command(
    name = "exs",
    version,
    about = "Exit valuation scenarios with tax impact",
    long_about = "Models the sale of a company stake under conservative, base, optimistic \
                  and custom valuations, computes the after-tax proceeds and ROI of each, \
                  and produces sale recommendations with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (JSON, or YAML for any other extension)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Value every scenario, compute tax impact and ROI, and recommend
    Analyze(AnalyzeArgs),
    /// Print the scenario catalog in effect
    Catalog(CatalogArgs),
    /// Tax impact of a sale at a single gross valuation
    TaxImpact(TaxImpactArgs),
    /// Estimate the stake to sell to raise a target amount
    SalePercentage(SalePercentageArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match input::config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::scenarios::run_analyze(args, &config),
        Commands::Catalog(args) => commands::scenarios::run_catalog(args, &config),
        Commands::TaxImpact(args) => commands::tax::run_tax_impact(args, &config),
        Commands::SalePercentage(args) => commands::scenarios::run_sale_percentage(args),
        Commands::Version => {
            println!("exs {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
