//! Reconciler integration tests
//!
//! End-to-end checks of the pipeline's guarantees: manual precedence,
//! keep-newest merging, ordering, identifier stability, and idempotent
//! output generation.

use std::collections::HashSet;

use proptest::prelude::*;
use vitae_bibtex::{BibTexEntry, BibTexEntryType};
use vitae_sync::export::project;
use vitae_sync::{reconcile, ManualKeySet, WorkRecord};

fn work(title: &str, doi: Option<&str>, date: Option<&str>, work_type: &str) -> WorkRecord {
    WorkRecord {
        title: title.to_string(),
        publication_year: date.and_then(|d| d[..4].parse().ok()),
        publication_date: date.map(String::from),
        doi: doi.map(String::from),
        cited_by_count: Some(3),
        venue: None,
        work_type: work_type.to_string(),
        authors: vec!["Nora Example".to_string()],
    }
}

fn manual_with(title: &str, doi: Option<&str>) -> ManualKeySet {
    let mut entry = BibTexEntry::new("manual", BibTexEntryType::Article);
    entry.add_field("title", title);
    if let Some(doi) = doi {
        entry.add_field("doi", doi);
    }
    ManualKeySet::from_entries([&entry])
}

// === Manual precedence ===

#[test]
fn manual_doi_wins_over_fetched_record() {
    let manual = manual_with("Manual Version", Some("10.9/shared"));
    let fetched = work(
        "Fetched Version With Different Title",
        Some("https://doi.org/10.9/SHARED"),
        Some("2024-01-01"),
        "journal-article",
    );

    let out = reconcile(vec![fetched], &manual);
    assert_eq!(out.total(), 0);

    let projection = project(&out);
    assert!(projection.publications.is_empty());
    assert!(projection.web.is_empty());
}

#[test]
fn manual_title_wins_over_fetched_record() {
    let manual = manual_with("A Hand-Curated Paper", None);
    let fetched = work(
        "a  hand-curated PAPER!",
        None,
        Some("2024-01-01"),
        "preprint",
    );

    let out = reconcile(vec![fetched], &manual);
    assert_eq!(out.total(), 0);
}

// === Merge and ordering ===

#[test]
fn newest_record_wins_for_shared_doi() {
    let out = reconcile(
        vec![
            work("Old Version", Some("10.9/d"), Some("2020-01-01"), "journal-article"),
            work("New Version", Some("10.9/d"), Some("2021-06-15"), "journal-article"),
        ],
        &ManualKeySet::default(),
    );

    assert_eq!(out.publications.len(), 1);
    assert_eq!(out.publications[0].title, "New Version");
    assert_eq!(out.publications[0].publication_date.as_deref(), Some("2021-06-15"));
}

#[test]
fn date_sort_puts_missing_dates_last() {
    let out = reconcile(
        vec![
            work("B", None, Some("2019-03-01"), "preprint"),
            work("C", None, None, "preprint"),
            work("A", None, Some("2022-11-20"), "preprint"),
        ],
        &ManualKeySet::default(),
    );

    let titles: Vec<&str> = out.working_papers.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

// === Classification ===

#[test]
fn journal_article_without_doi_is_a_publication() {
    let out = reconcile(
        vec![work("No DOI Yet", None, Some("2023-01-01"), "journal-article")],
        &ManualKeySet::default(),
    );
    assert_eq!(out.publications.len(), 1);
    assert!(out.working_papers.is_empty());
}

#[test]
fn preprint_with_venue_and_doi_is_a_publication() {
    let mut record = work("Hosted Preprint", Some("10.9/pp"), Some("2023-01-01"), "preprint");
    record.venue = Some("SSRN".to_string());

    let out = reconcile(vec![record], &ManualKeySet::default());
    assert_eq!(out.publications.len(), 1);
    assert!(out.working_papers.is_empty());
}

#[test]
fn bare_preprint_is_a_working_paper() {
    let out = reconcile(
        vec![work("Just a Draft", None, Some("2023-01-01"), "preprint")],
        &ManualKeySet::default(),
    );
    assert!(out.publications.is_empty());
    assert_eq!(out.working_papers.len(), 1);
}

// === Identifiers and idempotence ===

#[test]
fn identifiers_are_stable_across_runs() {
    let records = vec![
        work("Paper One", Some("10.9/one"), Some("2021-01-01"), "journal-article"),
        work("Paper Two", None, Some("2020-01-01"), "preprint"),
    ];

    let first = project(&reconcile(records.clone(), &ManualKeySet::default()));
    let second = project(&reconcile(records, &ManualKeySet::default()));

    let ids_first: Vec<&String> = first.web.iter().map(|r| &r.id).collect();
    let ids_second: Vec<&String> = second.web.iter().map(|r| &r.id).collect();
    assert_eq!(ids_first, ids_second);
}

#[test]
fn formatted_output_is_byte_identical_across_runs() {
    let records = vec![
        work("Paper One", Some("10.9/one"), Some("2021-01-01"), "journal-article"),
        work("Paper Two", None, Some("2020-01-01"), "preprint"),
        work("Paper Two", None, Some("2020-05-01"), "preprint"),
    ];
    let manual = manual_with("Something Else", None);

    let render = |records: Vec<WorkRecord>| {
        let projection = project(&reconcile(records, &manual));
        let bib = vitae_bibtex::format_entries(&projection.publications)
            + &vitae_bibtex::format_entries(&projection.working_papers);
        let json = serde_json::to_string_pretty(&projection.web).unwrap();
        (bib, json)
    };

    assert_eq!(render(records.clone()), render(records));
}

// === Property-based checks ===

fn arb_record() -> impl Strategy<Value = WorkRecord> {
    let title = prop::sample::select(vec!["alpha", "beta", "gamma", "delta"]);
    let doi = prop::option::of(prop::sample::select(vec!["10.1/a", "10.1/b", "10.1/c"]));
    let date = prop::option::of(prop::sample::select(vec![
        "2019-01-01",
        "2020-06-15",
        "2022-11-20",
        "bogus",
    ]));
    let work_type = prop::sample::select(vec!["journal-article", "preprint", "report"]);

    (title, doi, date, work_type).prop_map(|(title, doi, date, work_type)| {
        work(title, doi, date, work_type)
    })
}

proptest! {
    /// No two surviving records within a category share a NormalizedKey,
    /// and generated identifiers never collide across the whole output.
    #[test]
    fn no_duplicate_keys_survive(records in prop::collection::vec(arb_record(), 0..20)) {
        let out = reconcile(records, &ManualKeySet::default());

        for category in [&out.publications, &out.working_papers] {
            let keys: HashSet<_> = category.iter().map(|r| r.normalized_key()).collect();
            prop_assert_eq!(keys.len(), category.len());
        }

        let projection = project(&out);
        let ids: HashSet<_> = projection.web.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(ids.len(), projection.web.len());
    }

    /// Reconciling the same input twice yields the same output.
    #[test]
    fn reconcile_is_deterministic(records in prop::collection::vec(arb_record(), 0..20)) {
        let a = reconcile(records.clone(), &ManualKeySet::default());
        let b = reconcile(records, &ManualKeySet::default());
        prop_assert_eq!(a.publications, b.publications);
        prop_assert_eq!(a.working_papers, b.working_papers);
    }
}
