//! Cite key generation for synced entries
//!
//! Keys are `surname + year + suffix` where the suffix comes from the DOI
//! when there is one and from the normalized title otherwise. The same work
//! (same DOI or title) therefore gets the same key on every run, which
//! keeps regenerated files diff-stable.

use std::collections::HashSet;

use crate::normalize::{normalize_title, surname_for_key};
use crate::record::WorkRecord;

/// DOI suffixes keep more characters than title suffixes; DOIs are dense
/// identifiers, titles are already disambiguated by surname and year.
const DOI_SUFFIX_LEN: usize = 32;
const TITLE_SUFFIX_LEN: usize = 24;

/// Generate the deterministic cite key for a record
pub fn generate_cite_key(record: &WorkRecord) -> String {
    let surname = record
        .authors
        .first()
        .and_then(|name| surname_for_key(name))
        .unwrap_or_else(|| "author".to_string());

    let year = record
        .publication_year
        .map(|y| y.to_string())
        .unwrap_or_default();

    let suffix = match record.cleaned_doi() {
        Some(doi) => strip_non_alphanumeric(&doi, DOI_SUFFIX_LEN),
        // Truncate the normalized title first, then drop the spaces; the
        // previous generator did it in this order and existing keys must
        // not change
        None => {
            let normalized = normalize_title(&record.title);
            let truncated: String = normalized.chars().take(TITLE_SUFFIX_LEN).collect();
            strip_non_alphanumeric(&truncated, TITLE_SUFFIX_LEN)
        }
    };

    format!("{}{}{}", surname, year, suffix)
}

/// Make a key unique against already-assigned keys by appending a letter
/// suffix (`a`-`z`), then a numeric one if somehow exhausted.
pub fn make_key_unique(base: String, existing: &HashSet<String>) -> String {
    if !existing.contains(&base) {
        return base;
    }

    for letter in 'a'..='z' {
        let candidate = format!("{}{}", base, letter);
        if !existing.contains(&candidate) {
            return candidate;
        }
    }

    let mut n = 2u32;
    loop {
        let candidate = format!("{}{}", base, n);
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn strip_non_alphanumeric(s: &str, max_len: usize) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(max_len)
        .collect()
}
