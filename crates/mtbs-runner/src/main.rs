//! `mtbs`: download, check and clean MTBS wildfire perimeters.

use clap::{Parser, Subcommand};
use mtbs_acquire::{Catalogue, HttpFetcher, DEFAULT_CATALOGUE_PATH, INPUTS_CATEGORY};
use mtbs_runner::{run_check, run_clean, run_download, CleanConfig, DownloadConfig, RunnerError};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mtbs", about = "Download and clean MTBS wildfire perimeter data", version)]
struct Cli {
    /// Path to the data catalogue
    #[arg(long, global = true, default_value = DEFAULT_CATALOGUE_PATH)]
    catalogue: PathBuf,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and extract catalogue inputs that are not on disk yet
    Download {
        /// Catalogue category to acquire
        #[arg(long, default_value = INPUTS_CATEGORY)]
        category: String,
        /// Only acquire this dataset
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Check that a dataset's expected file is present
    Check {
        /// Catalogue category holding the dataset
        #[arg(long, default_value = INPUTS_CATEGORY)]
        category: String,
        /// Dataset to check
        #[arg(long, default_value = "wildfires")]
        dataset: String,
    },
    /// Load the perimeters and apply the cleaning steps
    Clean {
        /// Catalogue category holding the dataset
        #[arg(long, default_value = INPUTS_CATEGORY)]
        category: String,
        /// Dataset to clean
        #[arg(long, default_value = "wildfires")]
        dataset: String,
        /// Column holding the incident type
        #[arg(long, default_value = "Incid_Type")]
        filter_column: String,
        /// Incident types to keep (repeatable)
        #[arg(long = "keep", default_values = ["Wildfire", "Out of area response"])]
        keep: Vec<String>,
        /// Columns to min-max normalise (repeatable)
        #[arg(long = "normalise", default_values = ["BurnBndAc"])]
        normalise: Vec<String>,
        /// Write a JSON summary to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    let catalogue = Catalogue::load(&cli.catalogue)?;

    match cli.command {
        Commands::Download { category, dataset } => {
            let fetcher = HttpFetcher::new()?;
            let config = DownloadConfig { category, dataset };
            run_download(&catalogue, &config, &fetcher)?;
            let stats = fetcher.download_stats();
            info!(
                "Downloaded {} files ({} bytes)",
                stats.files_downloaded, stats.bytes_downloaded
            );
        }
        Commands::Check { category, dataset } => {
            let path = run_check(&catalogue, &category, &dataset)?;
            println!("{}", path.display());
        }
        Commands::Clean {
            category,
            dataset,
            filter_column,
            keep,
            normalise,
            report,
        } => {
            let config = CleanConfig {
                category,
                dataset,
                filter_column,
                keep,
                normalise,
                report_path: report,
            };
            let (_, report) = run_clean(&catalogue, &config)?;
            println!(
                "{} of {} perimeters kept ({} dropped), {} states",
                report.rows_kept,
                report.rows_read,
                report.rows_dropped,
                report.fires_by_state.len()
            );
        }
    }

    Ok(())
}
