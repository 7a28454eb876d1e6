//! Betaculator CLI binary.
//!
//! Estimates the beta of a security against its market index from CSV price
//! files.

mod paths;

use betaculator::data::{CsvPriceSource, Interval};
use betaculator::engine::RegressorConfig;
use betaculator::output::{ExportFormat, Exporter};
use betaculator::{
    BetaEstimate, BetaEstimator, DEFAULT_TRAILING_YEARS, MarketIndexTable, RegressionRequest,
    Window,
};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Longest trailing window accepted on the command line.
const MAX_TRAILING_YEARS: i64 = 50;

#[derive(Parser)]
#[command(name = "betaculator")]
#[command(about = "Betaculator: CAPM beta estimation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate beta for a security
    Estimate {
        /// Security symbol
        security: String,

        /// Market index symbol (overrides currency lookup)
        #[arg(long)]
        market: Option<String>,

        /// Currency used to pick the market index
        #[arg(long, default_value = "USD")]
        currency: String,

        /// First date of the window (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date of the window, exclusive (YYYY-MM-DD, default today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Trailing window in years when no start date is given
        #[arg(
            long,
            default_value_t = DEFAULT_TRAILING_YEARS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_TRAILING_YEARS)
        )]
        years: u32,

        /// Sampling interval (daily, weekly, monthly or 1d, 1wk, 1mo)
        #[arg(long, default_value = "weekly")]
        interval: String,

        /// Minimum number of aligned return pairs
        #[arg(long)]
        min_observations: Option<usize>,

        /// Directory of <SYMBOL>.csv price files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// JSON file mapping currencies to market indices
        #[arg(long)]
        index_table: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the full report to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show the market index configured for a currency
    Index {
        /// Currency code (lists all entries when omitted)
        currency: Option<String>,

        /// JSON file mapping currencies to market indices
        #[arg(long)]
        index_table: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ASCII summary table
    Text,
    /// JSON report with scatter points
    Json,
    /// Markdown summary
    Markdown,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Estimate {
            security,
            market,
            currency,
            start,
            end,
            years,
            interval,
            min_observations,
            data_dir,
            index_table,
            format,
            export,
        } => {
            let indices = load_indices(index_table)?;
            let window = resolve_window(start, end, years, Utc::now().date_naive());
            let interval: Interval = interval.parse()?;

            let request = match market {
                Some(market) => RegressionRequest {
                    security,
                    market,
                    window,
                    interval,
                },
                None => RegressionRequest::for_currency(security, &currency, &indices, window)?
                    .with_interval(interval),
            };

            let data_dir = data_dir.unwrap_or_else(paths::default_data_dir);
            debug!(data_dir = %data_dir.display(), "Using price directory");

            let mut config = RegressorConfig::default();
            if let Some(min) = min_observations {
                config.min_observations = min;
            }

            let estimator = BetaEstimator::with_config(CsvPriceSource::new(data_dir), config);
            let estimate = estimator.estimate(request)?;

            print_estimate(&estimate, format)?;

            if let Some(path) = export {
                let export_format = ExportFormat::from_path(&path)?;
                estimate.report().export_to_file(&path, export_format)?;
                info!(path = %path.display(), "Exported report");
            }
        }
        Commands::Index {
            currency,
            index_table,
        } => {
            let indices = load_indices(index_table)?;
            match currency {
                Some(currency) => println!("{}", indices.market_for(&currency)?),
                None => {
                    for code in indices.currencies() {
                        if let Some(index) = indices.lookup(code) {
                            println!("{code:<6} {index}");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "betaculator=debug"
    } else {
        "betaculator=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn load_indices(
    explicit: Option<PathBuf>,
) -> Result<MarketIndexTable, Box<dyn std::error::Error>> {
    match paths::index_table_path(explicit) {
        Some(path) => Ok(MarketIndexTable::from_json_file(path)?),
        None => Ok(MarketIndexTable::default()),
    }
}

/// Explicit start wins; otherwise a trailing window ending at `end` or today.
fn resolve_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    years: u32,
    today: NaiveDate,
) -> Window {
    let end = end.unwrap_or(today);
    match start {
        Some(start) => Window::Between { start, end },
        None => Window::Trailing { years, end },
    }
}

fn print_estimate(
    estimate: &BetaEstimate,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Text => print!("{}", estimate.summary().to_ascii_table()),
        OutputFormat::Markdown => print!("{}", estimate.summary().to_markdown()),
        OutputFormat::Json => println!("{}", estimate.report().to_json()?),
    }
    Ok(())
}
