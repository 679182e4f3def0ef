//! BibTeX entry data structures

use serde::{Deserialize, Serialize};

/// BibTeX entry type
///
/// Only the types the sync pipeline emits (`article`, `unpublished`) plus
/// the ones that commonly appear in hand-curated files. Anything else maps
/// to `Unknown` and formats as `misc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BibTexEntryType {
    Article,
    Book,
    InCollection,
    InProceedings,
    Misc,
    TechReport,
    Unpublished,
    Unknown,
}

impl BibTexEntryType {
    /// Parse an entry type from a string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "incollection" => Self::InCollection,
            "inproceedings" | "conference" => Self::InProceedings,
            "misc" => Self::Misc,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            _ => Self::Unknown,
        }
    }

    /// Convert entry type to canonical string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::Misc => "misc",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Unknown => "misc",
        }
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibTexField {
    pub key: String,
    pub value: String,
}

/// A BibTeX entry
///
/// Fields keep their insertion order so formatted output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibTexEntry {
    pub cite_key: String,
    pub entry_type: BibTexEntryType,
    pub fields: Vec<BibTexField>,
}

impl BibTexEntry {
    /// Create a new BibTeX entry
    pub fn new(cite_key: impl Into<String>, entry_type: BibTexEntryType) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type,
            fields: Vec::new(),
        }
    }

    /// Add a field to the entry
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTexField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.key.to_lowercase() == key_lower)
            .map(|f| f.value.as_str())
    }

    /// Get the title field
    pub fn title(&self) -> Option<&str> {
        self.get_field("title")
    }

    /// Get the DOI field
    pub fn doi(&self) -> Option<&str> {
        self.get_field("doi")
    }

    /// Get the year field
    pub fn year(&self) -> Option<&str> {
        self.get_field("year")
    }

    /// Sort key for output files: (year, cite key) ascending.
    ///
    /// A missing or non-numeric year sorts before any real year so undated
    /// entries cluster at the top of the file, matching the previous
    /// generator's ordering.
    pub fn year_key_ordering(&self) -> (i32, String) {
        let year = self
            .year()
            .and_then(|y| y.parse::<i32>().ok())
            .unwrap_or(i32::MIN);
        (year, self.cite_key.clone())
    }
}
