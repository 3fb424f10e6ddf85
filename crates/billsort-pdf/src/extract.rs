//! Bill text extraction.
//!
//! Each unprocessed PDF is loaded in full and its pages' text concatenated,
//! one newline after each page. A file whose text is blank, or which fails to
//! load or extract, is counted as a failure and left for the next run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::PdfError;

/// Outcome of extracting a batch of files.
#[derive(Debug, Default)]
pub struct Extraction {
    /// filename → full extracted text, for files that produced text.
    pub texts: BTreeMap<String, String>,
    pub succeeded: usize,
    pub failed: usize,
}

/// List PDFs in `dir` that are not in `processed`, sorted by name.
///
/// Only regular files with a `.pdf` extension (any case) are returned.
pub fn list_candidates(dir: &Path, processed: &BTreeSet<String>) -> Result<Vec<String>, PdfError> {
    let io_err = |source| PdfError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(name = ?entry.file_name(), "skipping non-UTF-8 filename");
            continue;
        };
        if !is_pdf(&name) || processed.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn is_pdf(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Extract the text of every page of the PDF at `path`.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let doc = Document::load(path).map_err(PdfError::Load)?;

    let mut text = String::new();
    for page in doc.get_pages().into_keys() {
        let page_text = doc
            .extract_text(&[page])
            .map_err(|source| PdfError::Extract { page, source })?;
        if !page_text.is_empty() {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    Ok(text)
}

/// Extract text for each of `candidates` under `dir` that is not yet processed.
pub fn extract_all(
    dir: &Path,
    candidates: &[String],
    processed: &BTreeSet<String>,
) -> Extraction {
    let mut out = Extraction::default();

    for name in candidates {
        if processed.contains(name) {
            continue;
        }
        match extract_text(&dir.join(name)) {
            Ok(text) if !text.trim().is_empty() => {
                debug!(file = %name, chars = text.len(), "extracted text");
                out.texts.insert(name.clone(), text);
                out.succeeded += 1;
            }
            Ok(_) => {
                warn!(file = %name, "no extractable text");
                out.failed += 1;
            }
            Err(e) => {
                warn!(file = %name, error = %e, "failed to process");
                out.failed += 1;
            }
        }
    }

    out
}
