//! vitae-sync: bibliography synchronization for a personal academic site
//!
//! Fetches a researcher's works from the OpenAlex API and regenerates the
//! local bibliography outputs: two BibTeX files (publications, working
//! papers) and one JSON file for the website. Manually curated BibTeX
//! entries always take precedence over fetched records.
//!
//! The decision logic (classification, manual-precedence filtering,
//! keep-newest duplicate merge, cite-key generation) is pure and lives in
//! [`reconcile`] and [`cite_key`], independent of the network fetch and
//! file writing.

pub mod cite_key;
pub mod config;
pub mod error;
pub mod export;
pub mod keyset;
pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod sources;

pub use config::SyncConfig;
pub use error::SyncError;
pub use keyset::ManualKeySet;
pub use reconcile::{reconcile, Category, ReconcileOutput};
pub use record::{NormalizedKey, WorkRecord};
