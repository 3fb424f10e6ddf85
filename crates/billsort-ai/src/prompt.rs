//! Classification prompt for bill text.

use billsort_core::Category;

/// Bill text beyond this many characters is not sent to the model.
pub const MAX_TEXT_CHARS: usize = 2_000_000;

/// Appended to the payload after a response that failed to parse.
pub const CORRECTION: &str = "\nOn your last attempt, you returned invalid JSON. \
Make sure you ONLY return valid JSON with a non-empty \"title\"; your output is \
passed directly to a JSON parser.";

const PREAMBLE: &str = "\
You are a generative language model that is part of an agentic pipeline designed to analyze \
bills and amend the U.S. Code.
You will be passed the text of one bill. Name the bill and list every section of the U.S. Code \
it amends. Output only valid JSON in this format:
{
  \"title\": \"The title of the bill as provided within the bill itself, including the year. \
If the Act has a 'Short Title' section, use the citation it provides. \
CRITICAL: all titles must be formatted like \\\"_____ Act of [year]\\\".\",
  \"author\": \"The author(s) of the bill.\",
  \"cosponsors\": \"The cosponsors of the bill.\",
  \"amendments\": \"A list of exactly which sections and titles of the U.S. Code are amended, \
formatted as [[Section, Title], [Section, Title], ...]. Include only numbered sections. \
For each section of the bill that makes law without amending the U.S. Code, include \
[null, <section of the bill>].\",
  \"category\": \"One code from the list below.\"
}
";

const POSTAMBLE: &str = "\
Do NOT wrap your answer in ```json or ``` markers. Output only the raw JSON object; it will be \
passed directly to a JSON parser and must not trigger a parsing error.";

/// Build the full prompt around `payload` (bill text plus any corrections).
pub fn build_prompt(payload: &str) -> String {
    let categories = Category::ALL
        .iter()
        .map(|c| format!("  {}: {}", c.code(), c.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{PREAMBLE}\
         Category codes:\n{categories}\n\
         {POSTAMBLE}\n\
         The text of the bill follows.\n\
         {payload}\n\
         Remember that you are only to output valid JSON in the provided format."
    )
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_payload_and_codes() {
        let prompt = build_prompt("SECTION 1. SHORT TITLE.");
        assert!(prompt.contains("SECTION 1. SHORT TITLE."));
        assert!(prompt.contains("ENRGY: energy-resources-and-policy"));
        assert!(prompt.contains("MARIT: maritime-and-oceanic-policy"));
        assert!(prompt.ends_with("in the provided format."));
    }

    #[test]
    fn truncate_short_text_untouched() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("§§§§", 2), "§§");
    }

    #[test]
    fn truncate_at_cap() {
        let text = "x".repeat(MAX_TEXT_CHARS + 10);
        assert_eq!(truncate_chars(&text, MAX_TEXT_CHARS).len(), MAX_TEXT_CHARS);
    }
}
