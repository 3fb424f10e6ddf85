//! Per-bill outputs: the metadata JSON file and the renamed source PDF.

use std::path::{Path, PathBuf};

use billsort_core::BillMetadata;
use chrono::Utc;
use tracing::{info, warn};

use crate::StoreError;

/// Result of writing a metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenJson {
    pub path: PathBuf,
    /// A file with the same stem existed and was replaced.
    pub overwrote: bool,
}

/// Result of renaming a source PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The filename stem already matched the sanitised title.
    Unchanged,
    Renamed {
        to: PathBuf,
        /// The plain `<stem>.pdf` target was taken and a suffix was added.
        disambiguated: bool,
    },
}

/// Write the model's record as indented JSON to `<json_dir>/<stem>.json`.
///
/// An existing file with the same stem is overwritten.
pub fn write_metadata(
    json_dir: &Path,
    stem: &str,
    meta: &BillMetadata,
) -> Result<WrittenJson, StoreError> {
    std::fs::create_dir_all(json_dir).map_err(|e| StoreError::io(json_dir, e))?;

    let path = json_dir.join(format!("{stem}.json"));
    let overwrote = path.exists();
    if overwrote {
        warn!(path = %path.display(), "overwriting existing metadata file");
    }

    let json = serde_json::to_string_pretty(meta.record())?;
    std::fs::write(&path, json).map_err(|e| StoreError::io(&path, e))?;
    info!(path = %path.display(), "JSON data saved");
    Ok(WrittenJson { path, overwrote })
}

/// Rename `<pdf_dir>/<filename>` to `<pdf_dir>/<stem>.pdf`.
///
/// Collisions get a Unix-timestamp suffix, `<stem>_<secs>.pdf`.
pub fn rename_pdf(pdf_dir: &Path, filename: &str, stem: &str) -> Result<RenameOutcome, StoreError> {
    rename_pdf_at(pdf_dir, filename, stem, Utc::now().timestamp())
}

/// [`rename_pdf`] with an explicit timestamp for the collision suffix.
pub fn rename_pdf_at(
    pdf_dir: &Path,
    filename: &str,
    stem: &str,
    now_secs: i64,
) -> Result<RenameOutcome, StoreError> {
    let current_stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    if current_stem == stem {
        info!(file = %filename, "file already has correct name");
        return Ok(RenameOutcome::Unchanged);
    }

    let from = pdf_dir.join(filename);
    let (to, disambiguated) = free_target(pdf_dir, stem, now_secs);
    std::fs::rename(&from, &to).map_err(|e| StoreError::io(&from, e))?;
    info!(from = %filename, to = %to.display(), "renamed PDF");
    Ok(RenameOutcome::Renamed { to, disambiguated })
}

/// First unused path among `<stem>.pdf`, `<stem>_<secs>.pdf`, `<stem>_<secs>_<n>.pdf`.
fn free_target(pdf_dir: &Path, stem: &str, now_secs: i64) -> (PathBuf, bool) {
    let plain = pdf_dir.join(format!("{stem}.pdf"));
    if !plain.exists() {
        return (plain, false);
    }

    let stamped = pdf_dir.join(format!("{stem}_{now_secs}.pdf"));
    if !stamped.exists() {
        return (stamped, true);
    }

    let mut n = 1u32;
    loop {
        let candidate = pdf_dir.join(format!("{stem}_{now_secs}_{n}.pdf"));
        if !candidate.exists() {
            return (candidate, true);
        }
        n += 1;
    }
}
