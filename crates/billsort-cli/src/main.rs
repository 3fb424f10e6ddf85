mod config;
mod pipeline;

use std::time::Instant;

use anyhow::Context;
use billsort_ai::GeminiClient;
use billsort_pdf::list_candidates;
use billsort_store::ProgressStore;
use clap::Parser;

use config::{Cli, Commands, PathArgs, Settings};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    tracing::info!("billsort v{}", env!("CARGO_PKG_VERSION"));

    // A .env file in the working directory may supply GOOGLE_API_KEY.
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            let settings = Settings::from_args(&cli.paths, &args);
            let model = GeminiClient::new(args.api_key, args.model);

            let t0 = Instant::now();
            let summary = pipeline::run(&settings, &model).await?;
            println!(
                "Done: {} candidates, {} extracted, {} finalised, {} failed after retries, {} unreadable ({:.1}s).",
                summary.candidates,
                summary.extracted,
                summary.finalize.finalized,
                summary.finalize.failed,
                summary.extract_failed,
                t0.elapsed().as_secs_f64()
            );
        }
        Commands::Status => status(&cli.paths)?,
    }
    Ok(())
}

fn status(paths: &PathArgs) -> anyhow::Result<()> {
    let store = ProgressStore::new(&paths.progress_file);
    let processed = store.load().context("loading progress checkpoint")?;
    let pending = list_candidates(&paths.pdf_dir, &processed)
        .with_context(|| format!("listing {}", paths.pdf_dir.display()))?;

    println!("Checkpoint: {}", store.path().display());
    println!("  processed: {}", processed.len());
    println!("  pending:   {} in {}", pending.len(), paths.pdf_dir.display());
    Ok(())
}
