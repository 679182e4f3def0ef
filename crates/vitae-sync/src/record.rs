//! Domain model for fetched scholarly works

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{clean_doi, normalize_title};

/// One scholarly work as reported by the metadata source.
///
/// Every field except the title is optional in practice; the source feed is
/// untrusted and frequently incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub title: String,
    pub publication_year: Option<i32>,
    /// ISO calendar date (`YYYY-MM-DD`) as reported upstream
    pub publication_date: Option<String>,
    /// DOI, possibly still carrying the `https://doi.org/` resolver prefix
    pub doi: Option<String>,
    pub cited_by_count: Option<i64>,
    /// Venue display name (journal, repository)
    pub venue: Option<String>,
    /// Source work type, e.g. `journal-article` or `preprint`
    pub work_type: String,
    /// Author display names in source order
    pub authors: Vec<String>,
}

impl WorkRecord {
    /// DOI with resolver prefix stripped and lowercased, if present and
    /// non-empty
    pub fn cleaned_doi(&self) -> Option<String> {
        self.doi
            .as_deref()
            .map(clean_doi)
            .filter(|d| !d.is_empty())
    }

    /// Canonical dedup key: DOI when available, normalized title otherwise
    pub fn normalized_key(&self) -> NormalizedKey {
        match self.cleaned_doi() {
            Some(doi) => NormalizedKey::Doi(doi),
            None => NormalizedKey::Title(normalize_title(&self.title)),
        }
    }

    /// Publication date parsed for comparison.
    ///
    /// Missing or unparseable dates degrade to the earliest possible date
    /// so any record with a real date beats one without; a bad date never
    /// excludes a record.
    pub fn sort_date(&self) -> NaiveDate {
        self.parsed_date().unwrap_or(NaiveDate::MIN)
    }

    /// Publication date parsed strictly as `YYYY-MM-DD`, if valid
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.publication_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    fn has_venue(&self) -> bool {
        self.venue.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    /// Whether this work counts as a publication rather than a working
    /// paper.
    ///
    /// The type field alone is not reliable for preprints hosted by a venue
    /// that assigns DOIs, so venue+DOI also qualifies.
    pub fn is_publication(&self) -> bool {
        self.work_type == "journal-article" || (self.has_venue() && self.cleaned_doi().is_some())
    }
}

/// Canonical dedup key derived from DOI or normalized title.
///
/// Two records are duplicates iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedKey {
    Doi(String),
    Title(String),
}
