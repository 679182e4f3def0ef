//! Projection of reconciled records into output files
//!
//! Two BibTeX files (publications, working papers) plus one JSON array for
//! the website. Projection is pure; writing happens in [`write_outputs`].
//! All three files are regenerated in full on every run.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::info;
use vitae_bibtex::{format_entries, BibTexEntry, BibTexEntryType};

use crate::cite_key::{generate_cite_key, make_key_unique};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::reconcile::{Category, ReconcileOutput};
use crate::record::WorkRecord;

/// Flattened record for the website
#[derive(Debug, Clone, Serialize)]
pub struct WebRecord {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub doi: Option<String>,
    pub doi_url: Option<String>,
    pub cited_by_count: Option<i64>,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    #[serde(rename = "type")]
    pub work_type: String,
}

/// Everything a run writes, fully materialized before any file I/O
#[derive(Debug, Clone, Default)]
pub struct Projection {
    /// `@article` entries, ordered (year, cite key) ascending
    pub publications: Vec<BibTexEntry>,
    /// `@unpublished` entries, ordered (year, cite key) ascending
    pub working_papers: Vec<BibTexEntry>,
    /// Publications then working papers, each date descending
    pub web: Vec<WebRecord>,
}

/// Project reconciled records into BibTeX entries and web records.
///
/// Cite keys are assigned across both categories so no two output entries
/// ever share one; the keep-newest merge already makes a collision next to
/// impossible, the uniquifier makes it structural.
pub fn project(output: &ReconcileOutput) -> Projection {
    let mut assigned: HashSet<String> = HashSet::new();
    let mut projection = Projection::default();

    for record in &output.publications {
        let key = assign_key(record, &mut assigned);
        projection
            .publications
            .push(to_bib_entry(record, Category::Publication, &key));
        projection
            .web
            .push(to_web_record(record, Category::Publication, key));
    }
    for record in &output.working_papers {
        let key = assign_key(record, &mut assigned);
        projection
            .working_papers
            .push(to_bib_entry(record, Category::WorkingPaper, &key));
        projection
            .web
            .push(to_web_record(record, Category::WorkingPaper, key));
    }

    projection
        .publications
        .sort_by_key(|e| e.year_key_ordering());
    projection
        .working_papers
        .sort_by_key(|e| e.year_key_ordering());

    projection
}

fn assign_key(record: &WorkRecord, assigned: &mut HashSet<String>) -> String {
    let key = make_key_unique(generate_cite_key(record), assigned);
    assigned.insert(key.clone());
    key
}

fn keyword(category: Category) -> &'static str {
    match category {
        Category::Publication => "publication",
        Category::WorkingPaper => "workingpaper",
    }
}

/// Bibliographic projection of one record
fn to_bib_entry(record: &WorkRecord, category: Category, cite_key: &str) -> BibTexEntry {
    let entry_type = match category {
        Category::Publication => BibTexEntryType::Article,
        Category::WorkingPaper => BibTexEntryType::Unpublished,
    };

    let mut entry = BibTexEntry::new(cite_key, entry_type);
    entry.add_field("title", &record.title);
    entry.add_field("author", record.authors.join(" and "));
    if let Some(year) = record.publication_year {
        entry.add_field("year", year.to_string());
    }
    if category == Category::Publication {
        if let Some(venue) = record.venue.as_deref().filter(|v| !v.trim().is_empty()) {
            entry.add_field("journal", venue);
        }
    }
    if let Some(doi) = record.cleaned_doi() {
        entry.add_field("doi", doi);
    }
    if let Some(date) = record.publication_date.as_deref() {
        entry.add_field("date", date);
    }
    if let Some(count) = record.cited_by_count {
        entry.add_field("note", format!("Cited by {}", count));
    }
    entry.add_field("keywords", keyword(category));

    entry
}

/// Web-display projection of one record
fn to_web_record(record: &WorkRecord, category: Category, id: String) -> WebRecord {
    let doi = record.cleaned_doi();
    let doi_url = doi.as_deref().map(|d| format!("https://doi.org/{}", d));

    WebRecord {
        id,
        title: record.title.clone(),
        year: record.publication_year,
        date: record.publication_date.clone(),
        venue: record.venue.clone(),
        doi,
        doi_url,
        cited_by_count: record.cited_by_count,
        keywords: vec![keyword(category).to_string()],
        authors: record.authors.clone(),
        work_type: record.work_type.clone(),
    }
}

/// Counts reported after a successful run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub publications: usize,
    pub working_papers: usize,
    pub web_records: usize,
}

/// Write all three output files, overwriting previous runs
pub fn write_outputs(projection: &Projection, config: &SyncConfig) -> Result<RunSummary, SyncError> {
    write_file(&config.out_publications, &format_entries(&projection.publications))?;
    write_file(
        &config.out_working_papers,
        &format_entries(&projection.working_papers),
    )?;

    let json = serde_json::to_string_pretty(&projection.web)?;
    write_file(&config.out_web_json, &(json + "\n"))?;

    Ok(RunSummary {
        publications: projection.publications.len(),
        working_papers: projection.working_papers.len(),
        web_records: projection.web.len(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), SyncError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SyncError::io(parent.display().to_string(), e))?;
    }
    std::fs::write(path, contents).map_err(|e| SyncError::io(path.display().to_string(), e))?;
    info!("wrote {}", path.display());
    Ok(())
}
