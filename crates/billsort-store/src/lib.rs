//! Storage layer: the processed-file checkpoint and per-bill output files.

mod error;
pub use error::StoreError;

pub mod output;
pub mod progress;

pub use output::{RenameOutcome, WrittenJson, rename_pdf, write_metadata};
pub use progress::{ProcessedSet, ProgressStore};
