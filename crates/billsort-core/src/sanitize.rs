//! Filename sanitisation for model-provided bill titles.
//!
//! The sanitised title is the shared stem of the JSON output and the renamed
//! PDF, so it must be safe on every common filesystem.

/// Name used when nothing usable survives sanitisation.
pub const FALLBACK_NAME: &str = "Untitled_Bill";

/// Upper bound on the sanitised stem, in characters.
pub const MAX_FILENAME_CHARS: usize = 200;

const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turn an arbitrary title into a filesystem-safe stem.
///
/// 1. Replace `< > : " / \ | ? *` and control characters with spaces
/// 2. Collapse whitespace runs to a single space and trim
/// 3. Truncate to [`MAX_FILENAME_CHARS`] characters
/// 4. Fall back to [`FALLBACK_NAME`] if nothing is left
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if ILLEGAL.contains(&c) || c.is_control() {
                ' '
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_FILENAME_CHARS).collect();
    // Truncation can land right after a space.
    let trimmed = truncated.trim_end();

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
