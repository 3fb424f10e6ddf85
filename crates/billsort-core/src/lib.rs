pub mod bill;
pub mod response;
pub mod sanitize;

pub use bill::{Amendment, BillMetadata, Category};
pub use response::{ParseError, parse_metadata, strip_code_fences};
pub use sanitize::{FALLBACK_NAME, MAX_FILENAME_CHARS, sanitize_filename};
