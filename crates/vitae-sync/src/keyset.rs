//! Manually curated keys that take precedence over fetched records

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use vitae_bibtex::BibTexEntry;

use crate::error::SyncError;
use crate::normalize::{clean_doi, normalize_title};
use crate::record::WorkRecord;

/// DOIs and normalized titles already present in the manual bibliography
/// files.
///
/// Any fetched record matching either set is excluded from automated
/// output; manual entries are never overwritten or duplicated.
#[derive(Debug, Default, Clone)]
pub struct ManualKeySet {
    dois: HashSet<String>,
    titles: HashSet<String>,
}

impl ManualKeySet {
    /// Build the key set from parsed manual entries
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a BibTexEntry>) -> Self {
        let mut set = Self::default();
        for entry in entries {
            set.add_entry(entry);
        }
        set
    }

    /// Load and merge all existing manual bibliography files.
    ///
    /// Missing files are skipped (a site may have no manual working
    /// papers); a file that exists but cannot be read fails the run, since
    /// manual precedence cannot be honored with an unknown manual set.
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self, SyncError> {
        let mut set = Self::default();

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                debug!("manual bibliography {} not present, skipping", path.display());
                continue;
            }

            let text = std::fs::read_to_string(path)
                .map_err(|e| SyncError::io(path.display().to_string(), e))?;
            let parsed = vitae_bibtex::parse(&text).map_err(|e| SyncError::Bib {
                path: path.display().to_string(),
                source: e,
            })?;

            for err in &parsed.errors {
                warn!(
                    "manual bibliography {} line {}: {}",
                    path.display(),
                    err.line,
                    err.message
                );
            }

            for entry in &parsed.entries {
                set.add_entry(entry);
            }
        }

        Ok(set)
    }

    fn add_entry(&mut self, entry: &BibTexEntry) {
        if let Some(doi) = entry.doi() {
            let doi = clean_doi(doi);
            if !doi.is_empty() {
                self.dois.insert(doi);
            }
        }
        // An absent title normalizes to "", same as the original generator's
        // behavior of always inserting the (possibly empty) title key
        self.titles
            .insert(normalize_title(entry.title().unwrap_or("")));
    }

    /// Whether a fetched record collides with a manual entry.
    ///
    /// Either a DOI match or a normalized-title match is sufficient.
    pub fn contains(&self, record: &WorkRecord) -> bool {
        if let Some(doi) = record.cleaned_doi() {
            if self.dois.contains(&doi) {
                return true;
            }
        }
        self.titles.contains(&normalize_title(&record.title))
    }

    pub fn is_empty(&self) -> bool {
        self.dois.is_empty() && self.titles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dois.len() + self.titles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_bibtex::BibTexEntryType;

    fn work(title: &str, doi: Option<&str>) -> WorkRecord {
        WorkRecord {
            title: title.to_string(),
            publication_year: None,
            publication_date: None,
            doi: doi.map(String::from),
            cited_by_count: None,
            venue: None,
            work_type: "journal-article".to_string(),
            authors: vec![],
        }
    }

    #[test]
    fn test_doi_match_drops_record() {
        let mut entry = BibTexEntry::new("manual1", BibTexEntryType::Article);
        entry.add_field("title", "Manual Paper");
        entry.add_field("doi", "10.5555/manual");
        let set = ManualKeySet::from_entries([&entry]);

        let fetched = work("Completely Different Title", Some("https://doi.org/10.5555/MANUAL"));
        assert!(set.contains(&fetched));
    }

    #[test]
    fn test_title_match_drops_record() {
        let mut entry = BibTexEntry::new("manual1", BibTexEntryType::Article);
        entry.add_field("title", "The  Manual   Paper!");
        let set = ManualKeySet::from_entries([&entry]);

        let fetched = work("the manual paper", None);
        assert!(set.contains(&fetched));
        assert!(!set.contains(&work("another paper", None)));
    }

    #[test]
    fn test_load_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("manual.bib");
        std::fs::write(
            &present,
            "@article{m1, title = {Kept By Hand}, doi = {10.1/kept} }",
        )
        .unwrap();
        let missing = dir.path().join("nope.bib");

        let set = ManualKeySet::load(&[present, missing]).unwrap();
        assert!(set.contains(&work("kept by hand", None)));
        assert!(set.contains(&work("other", Some("10.1/KEPT"))));
    }
}
