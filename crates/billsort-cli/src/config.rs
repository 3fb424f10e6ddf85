//! Command-line surface and the resolved run settings.

use std::path::PathBuf;
use std::time::Duration;

use billsort_ai::{DEFAULT_MODEL, RetitleOptions};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "billsort",
    version,
    about = "Classify, retitle, and file legislative bill PDFs with a generative model"
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, classify, and finalise every unprocessed PDF
    Run(RunArgs),
    /// Show checkpoint and pending file counts
    Status,
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Directory holding the bill PDFs (renamed in place)
    #[arg(long, global = true, env = "BILLSORT_PDF_DIR", default_value = "pdfs")]
    pub pdf_dir: PathBuf,

    /// Directory receiving one JSON metadata file per bill
    #[arg(long, global = true, env = "BILLSORT_JSON_DIR", default_value = "json_outputs")]
    pub json_dir: PathBuf,

    /// Checkpoint of already-processed filenames
    #[arg(
        long,
        global = true,
        env = "BILLSORT_PROGRESS_FILE",
        default_value = "bill_processing_progress.json"
    )]
    pub progress_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Gemini model name
    #[arg(long, env = "BILLSORT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Model calls per bill before giving up until the next run
    #[arg(long, default_value_t = 5)]
    pub attempts: u32,

    /// Seconds to wait between retries and after each finalised bill
    #[arg(long, default_value_t = 15)]
    pub delay_secs: u64,

    /// Consider at most this many unprocessed PDFs (default: all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Everything a pipeline run needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pdf_dir: PathBuf,
    pub json_dir: PathBuf,
    pub progress_file: PathBuf,
    pub retitle: RetitleOptions,
    /// Pause after each finalised bill.
    pub throttle: Duration,
    pub limit: Option<usize>,
}

impl Settings {
    pub fn from_args(paths: &PathArgs, run: &RunArgs) -> Self {
        let delay = Duration::from_secs(run.delay_secs);
        Self {
            pdf_dir: paths.pdf_dir.clone(),
            json_dir: paths.json_dir.clone(),
            progress_file: paths.progress_file.clone(),
            retitle: RetitleOptions {
                attempts: run.attempts,
                delay,
            },
            throttle: delay,
            limit: run.limit,
        }
    }
}
