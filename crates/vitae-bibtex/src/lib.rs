//! BibTeX model, formatting, and parsing
//!
//! This crate provides the small BibTeX surface the vitae site tools need:
//! - An entry model with case-insensitive field access
//! - A formatter for writing generated bibliography files
//! - A tolerant nom-based parser for reading manually curated files
//!
//! The parser recovers from malformed entries (skipping to the next `@`)
//! so a hand-edited file with one bad entry still yields the rest.

mod entry;
mod formatter;
pub mod parser;

pub use entry::{BibTexEntry, BibTexEntryType, BibTexField};
pub use formatter::{format_entries, format_entry};
pub use parser::{parse, BibTexParseError, BibTexParseResult, ParseError};
