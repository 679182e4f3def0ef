//! The reconciler: manual precedence, duplicate merge, ordering
//!
//! Pure functions over in-memory collections; no network or file I/O.
//! The pipeline is: classify each fetched record, drop anything already
//! curated by hand, merge duplicates within each category keeping the most
//! recent record, and sort each category by date descending.

use std::collections::HashMap;

use tracing::debug;

use crate::keyset::ManualKeySet;
use crate::record::{NormalizedKey, WorkRecord};

/// Output category for a fetched record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Publication,
    WorkingPaper,
}

impl Category {
    pub fn of(record: &WorkRecord) -> Self {
        if record.is_publication() {
            Self::Publication
        } else {
            Self::WorkingPaper
        }
    }
}

/// Deduplicated, sorted reconciliation result
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutput {
    /// Journal articles and venue+DOI works, date descending
    pub publications: Vec<WorkRecord>,
    /// Everything else, date descending
    pub working_papers: Vec<WorkRecord>,
}

impl ReconcileOutput {
    pub fn total(&self) -> usize {
        self.publications.len() + self.working_papers.len()
    }
}

/// Reconcile fetched records against the manually curated key set.
///
/// Guarantees on the output:
/// - no record collides (by [`NormalizedKey`]) with a manual entry
/// - within each category, no two records collide with each other
/// - each category is sorted by publication date descending, records
///   without a parseable date last
pub fn reconcile(records: Vec<WorkRecord>, manual: &ManualKeySet) -> ReconcileOutput {
    let mut publications = Vec::new();
    let mut working_papers = Vec::new();

    for record in records {
        if manual.contains(&record) {
            debug!("skipping manually curated work: {}", record.title);
            continue;
        }
        match Category::of(&record) {
            Category::Publication => publications.push(record),
            Category::WorkingPaper => working_papers.push(record),
        }
    }

    ReconcileOutput {
        publications: merge_and_sort(publications),
        working_papers: merge_and_sort(working_papers),
    }
}

/// Merge duplicates by [`NormalizedKey`], keeping the newest record, then
/// sort by date descending.
///
/// A record with any parseable date beats one without (missing dates sort
/// as the earliest possible value); on equal dates the first-encountered
/// record wins. First-encounter order is also what positions the surviving
/// records before the final sort, so the merge is deterministic for a given
/// input order.
fn merge_and_sort(records: Vec<WorkRecord>) -> Vec<WorkRecord> {
    let mut by_key: HashMap<NormalizedKey, usize> = HashMap::new();
    let mut kept: Vec<WorkRecord> = Vec::with_capacity(records.len());

    for record in records {
        let key = record.normalized_key();
        match by_key.get(&key) {
            Some(&idx) => {
                if record.sort_date() > kept[idx].sort_date() {
                    debug!("duplicate {:?}: keeping newer record", key);
                    kept[idx] = record;
                }
            }
            None => {
                by_key.insert(key, kept.len());
                kept.push(record);
            }
        }
    }

    kept.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));
    kept
}
