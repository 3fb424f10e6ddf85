//! PDF layer: candidate discovery in the input directory and text extraction via lopdf.

mod error;
pub use error::PdfError;

pub mod extract;

pub use extract::{Extraction, extract_all, extract_text, list_candidates};
