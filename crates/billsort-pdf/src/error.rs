use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to load PDF: {0}")]
    Load(#[source] lopdf::Error),

    #[error("failed to extract text from page {page}: {source}")]
    Extract { page: u32, source: lopdf::Error },

    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
