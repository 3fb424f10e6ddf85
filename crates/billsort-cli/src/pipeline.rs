//! Bill pipeline: checkpoint → extract → classify → write JSON, rename, checkpoint.
//!
//! Bills are handled strictly one at a time. Each finalised bill is written
//! to the checkpoint before the next one starts.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use billsort_ai::{TextModel, request_retitle};
use billsort_core::sanitize_filename;
use billsort_pdf::{extract_all, list_candidates};
use billsort_store::{ProcessedSet, ProgressStore, RenameOutcome, rename_pdf, write_metadata};
use tracing::{error, info, warn};

use crate::config::Settings;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FinalizeSummary {
    pub finalized: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub extracted: usize,
    pub extract_failed: usize,
    pub finalize: FinalizeSummary,
}

/// Run the full pipeline over the configured input directory.
pub async fn run(settings: &Settings, model: &dyn TextModel) -> anyhow::Result<RunSummary> {
    std::fs::create_dir_all(&settings.json_dir).with_context(|| {
        format!("creating output directory {}", settings.json_dir.display())
    })?;

    let store = ProgressStore::new(&settings.progress_file);
    let mut processed = store.load().context("loading progress checkpoint")?;

    let mut candidates = list_candidates(&settings.pdf_dir, &processed)
        .with_context(|| format!("listing {}", settings.pdf_dir.display()))?;
    if let Some(limit) = settings.limit {
        candidates.truncate(limit);
    }
    info!(
        pending = candidates.len(),
        already_processed = processed.len(),
        "starting bill run"
    );

    let extraction = extract_all(&settings.pdf_dir, &candidates, &processed);
    println!(
        "Processed {}. {} failed to process.",
        extraction.succeeded, extraction.failed
    );

    let finalize =
        finalize_all(&extraction.texts, &mut processed, &store, settings, model).await?;

    Ok(RunSummary {
        candidates: candidates.len(),
        extracted: extraction.succeeded,
        extract_failed: extraction.failed,
        finalize,
    })
}

/// Classify each bill and persist its outputs.
///
/// Only filesystem errors other than a rename collision abort the run.
pub async fn finalize_all(
    texts: &BTreeMap<String, String>,
    processed: &mut ProcessedSet,
    store: &ProgressStore,
    settings: &Settings,
    model: &dyn TextModel,
) -> anyhow::Result<FinalizeSummary> {
    let mut summary = FinalizeSummary::default();
    // sanitised title → source filename, for collision reporting
    let mut titles: HashMap<String, String> = HashMap::new();
    let total = texts.len();

    for (i, (filename, text)) in texts.iter().enumerate() {
        info!(file = %filename, n = i + 1, total, "classifying bill");

        let Some(meta) = request_retitle(model, text, &settings.retitle).await else {
            error!(file = %filename, "Failed after maximum attempts.");
            summary.failed += 1;
            continue;
        };

        info!(
            file = %filename,
            category = meta.category().map(|c| c.code()).unwrap_or("-"),
            amendments = meta.amendments().len(),
            "metadata received"
        );
        let stem = sanitize_filename(meta.title());
        let written = write_metadata(&settings.json_dir, &stem, &meta)
            .with_context(|| format!("writing metadata for {filename}"))?;
        if written.overwrote
            && let Some(previous) = titles.get(&stem)
        {
            warn!(
                file = %filename,
                previous = %previous,
                title = %stem,
                "title collision: metadata from an earlier bill was replaced"
            );
        }
        titles.insert(stem.clone(), filename.clone());

        match rename_pdf(&settings.pdf_dir, filename, &stem)
            .with_context(|| format!("renaming {filename}"))?
        {
            RenameOutcome::Unchanged => {}
            RenameOutcome::Renamed { to, disambiguated } => {
                if disambiguated {
                    warn!(file = %filename, to = %to.display(), "target name taken, added timestamp");
                }
                println!("File '{filename}' renamed to '{}' successfully.", to.display());
                // The renamed file is done too; record it so reruns skip it.
                if let Some(name) = to.file_name().and_then(|n| n.to_str()) {
                    processed.insert(name.to_string());
                }
            }
        }

        processed.insert(filename.clone());
        store.save(processed).context("saving progress checkpoint")?;
        summary.finalized += 1;

        if i + 1 < total {
            tokio::time::sleep(settings.throttle).await;
        }
    }

    Ok(summary)
}
