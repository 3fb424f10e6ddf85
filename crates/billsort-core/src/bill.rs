//! Bill metadata produced by the classification model.
//!
//! [`BillMetadata`] keeps the model's JSON object exactly as it arrived; that
//! object is what gets written to the output directory. The typed accessors
//! are read-only views and never reject a shape they don't recognise.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Structured metadata for a single bill.
#[derive(Debug, Clone, PartialEq)]
pub struct BillMetadata {
    title: String,
    record: Map<String, Value>,
}

impl BillMetadata {
    /// Wrap a model record. `None` unless `title` is a non-blank string.
    pub fn from_record(record: Map<String, Value>) -> Option<Self> {
        let title = match record.get("title") {
            Some(Value::String(t)) if !t.trim().is_empty() => t.clone(),
            _ => return None,
        };
        Some(Self { title, record })
    }

    /// Short title of the Act, e.g. "Clean Water Act of 2023".
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The record as the model sent it.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn author(&self) -> Option<String> {
        self.record.get("author").and_then(text_or_list)
    }

    pub fn cosponsors(&self) -> Option<String> {
        self.record.get("cosponsors").and_then(text_or_list)
    }

    /// Well-formed `[section, title]` pairs; other entries are skipped.
    pub fn amendments(&self) -> Vec<Amendment> {
        match self.record.get("amendments") {
            Some(Value::Array(items)) => items.iter().filter_map(Amendment::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// The category, when it is exactly one recognised code.
    pub fn category(&self) -> Option<Category> {
        match self.record.get("category") {
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }
}

impl Serialize for BillMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

/// One `[section, title]` pair from the `amendments` list.
///
/// `section` is `None` for parts of the bill that make law without amending
/// the U.S. Code; `target` then names the bill's own section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amendment {
    pub section: Option<String>,
    pub target: String,
}

impl Amendment {
    pub fn new(section: Option<&str>, target: &str) -> Self {
        Self {
            section: section.map(str::to_string),
            target: target.to_string(),
        }
    }

    /// Read a two-element JSON array. Numbers count as their text.
    pub fn from_value(v: &Value) -> Option<Self> {
        let [section, target] = v.as_array()?.as_slice() else {
            return None;
        };
        let section = match section {
            Value::Null => None,
            other => Some(scalar_text(other)?),
        };
        Some(Self {
            section,
            target: scalar_text(target)?,
        })
    }

    /// True when this entry makes law without touching the U.S. Code.
    pub fn is_freestanding(&self) -> bool {
        self.section.is_none()
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A string, or a list of scalars joined with ", ".
fn text_or_list(v: &Value) -> Option<String> {
    match v {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            Some(parts.join(", "))
        }
        other => scalar_text(other),
    }
}

/// Policy area codes the model chooses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comm,
    Defn,
    Tribe,
    Govt,
    Econ,
    Enrgy,
    Edu,
    Sec,
    Fema,
    Tran,
    Hlth,
    Crts,
    Envrn,
    Agri,
    Just,
    Hous,
    Tax,
    Marit,
    Sci,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Self::Comm,
        Self::Defn,
        Self::Tribe,
        Self::Govt,
        Self::Econ,
        Self::Enrgy,
        Self::Edu,
        Self::Sec,
        Self::Fema,
        Self::Tran,
        Self::Hlth,
        Self::Crts,
        Self::Envrn,
        Self::Agri,
        Self::Just,
        Self::Hous,
        Self::Tax,
        Self::Marit,
        Self::Sci,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Comm => "COMM",
            Self::Defn => "DEFN",
            Self::Tribe => "TRIBE",
            Self::Govt => "GOVT",
            Self::Econ => "ECON",
            Self::Enrgy => "ENRGY",
            Self::Edu => "EDU",
            Self::Sec => "SEC",
            Self::Fema => "FEMA",
            Self::Tran => "TRAN",
            Self::Hlth => "HLTH",
            Self::Crts => "CRTS",
            Self::Envrn => "ENVRN",
            Self::Agri => "AGRI",
            Self::Just => "JUST",
            Self::Hous => "HOUS",
            Self::Tax => "TAX",
            Self::Marit => "MARIT",
            Self::Sci => "SCI",
        }
    }

    /// The policy area slug the code stands for.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Comm => "commerce-trade-and-industry",
            Self::Defn => "defense-and-veterans-affairs",
            Self::Tribe => "cultural-recreational-and-tribal-affairs",
            Self::Govt => "government-administration-and-oversight",
            Self::Econ => "economic-budgetary-and-financial-policy",
            Self::Enrgy => "energy-resources-and-policy",
            Self::Edu => "education-labor-and-workforce-development",
            Self::Sec => "international-affairs-and-national-security",
            Self::Fema => "emergency-prepardness-and-disaster-relief",
            Self::Tran => "transportation-and-infrastructure",
            Self::Hlth => "healthcare-and-social-services",
            Self::Crts => "civil-rights-and-liberties",
            Self::Envrn => "environmental-conservation-climate-and-natural-resources",
            Self::Agri => "agriculture-food-and-rural-development",
            Self::Just => "public-safety-immigration-and-justice",
            Self::Hous => "housing-and-urban-development",
            Self::Tax => "taxation-and-revenue",
            Self::Marit => "maritime-and-oceanic-policy",
            Self::Sci => "science-technology-and-innovation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category code: {wanted:?}"))
    }
}
