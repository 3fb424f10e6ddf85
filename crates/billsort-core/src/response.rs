//! Parsing of the classification model's raw text response.
//!
//! Markdown fences are stripped, the body must be a JSON object, and `title`
//! must be a non-blank string. Nothing else about the record is checked; the
//! rest is kept as the model wrote it.

use serde_json::Value;
use thiserror::Error;

use crate::bill::BillMetadata;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("missing or blank \"title\" field")]
    MissingTitle,
}

/// Remove ```` ```json ```` / ```` ``` ```` markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a raw model response into [`BillMetadata`].
pub fn parse_metadata(raw: &str) -> Result<BillMetadata, ParseError> {
    let body = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&body)?;

    let obj = match value {
        Value::Object(obj) => obj,
        Value::Array(_) => return Err(ParseError::NotAnObject("array")),
        Value::String(_) => return Err(ParseError::NotAnObject("string")),
        Value::Number(_) => return Err(ParseError::NotAnObject("number")),
        Value::Bool(_) => return Err(ParseError::NotAnObject("bool")),
        Value::Null => return Err(ParseError::NotAnObject("null")),
    };

    BillMetadata::from_record(obj).ok_or(ParseError::MissingTitle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::Category;

    const BODY: &str = r#"{
        "title": "Rural Broadband Act of 2022",
        "author": "Sen. Smith",
        "cosponsors": "Sen. Jones",
        "amendments": [["1302", "Title 47"], [null, "Section 4"]],
        "category": "COMM"
    }"#;

    #[test]
    fn parses_raw_json() {
        let meta = parse_metadata(BODY).unwrap();
        assert_eq!(meta.title(), "Rural Broadband Act of 2022");
        assert_eq!(meta.category(), Some(Category::Comm));
        assert_eq!(meta.amendments().len(), 2);
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{BODY}\n```");
        let meta = parse_metadata(&fenced).unwrap();
        assert_eq!(meta.author().as_deref(), Some("Sen. Smith"));
    }

    #[test]
    fn parses_bare_fence() {
        let fenced = format!("```\n{BODY}\n```\n");
        assert!(parse_metadata(&fenced).is_ok());
    }

    #[test]
    fn strip_leaves_plain_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_metadata("{\"title\": \"X\",}").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn rejects_python_none() {
        let err = parse_metadata(r#"{"title": "X Act", "amendments": [[None, "Sec. 2"]]}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn rejects_missing_title() {
        let err = parse_metadata(r#"{"author": "Rep. A"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingTitle));
    }

    #[test]
    fn rejects_blank_title() {
        let err = parse_metadata(r#"{"title": "   "}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingTitle));
    }

    #[test]
    fn rejects_non_string_title() {
        let err = parse_metadata(r#"{"title": 42}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingTitle));
    }

    #[test]
    fn rejects_top_level_array() {
        let err = parse_metadata("[1, 2]").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject("array")));
    }

    #[test]
    fn loose_fields_still_parse() {
        for body in [
            r#"{"title": "No Change Act of 2020", "amendments": null}"#,
            r#"{"title": "Mixed Act of 2020", "category": "COMM, ECON"}"#,
            r#"{"title": "Odd Act of 2020", "author": {"name": "Rep. A"}}"#,
            r#"{"title": "Short Act of 2020", "amendments": [["552"], [1, 2, 3]]}"#,
            r#"{"title": "Null Act of 2020", "category": null, "cosponsors": 3}"#,
        ] {
            let meta = parse_metadata(body).unwrap_or_else(|e| panic!("{body}: {e}"));
            assert!(meta.title().ends_with("Act of 2020"));
        }
    }

    #[test]
    fn keeps_the_record_as_sent() {
        let body = r#"{"amendments":[[7,26]],"category":"comm","cosponsors":["Rep. A","Rep. B"],"title":"X Act of 2020"}"#;
        let meta = parse_metadata(body).unwrap();
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(Value::Object(meta.record().clone()), expected);
    }
}
