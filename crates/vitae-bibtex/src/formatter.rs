//! BibTeX formatting
//!
//! Converts entries back to BibTeX text. Values are brace-delimited unless
//! purely numeric, matching common BibTeX writer output.

use super::entry::BibTexEntry;

/// Format a single BibTeX entry to string
pub fn format_entry(entry: &BibTexEntry) -> String {
    let mut result = String::new();

    result.push('@');
    result.push_str(entry.entry_type.as_str());
    result.push('{');
    result.push_str(&entry.cite_key);
    result.push_str(",\n");

    for field in &entry.fields {
        result.push_str("  ");
        result.push_str(&field.key);
        result.push_str(" = ");
        result.push_str(&format_field_value(&field.value));
        result.push_str(",\n");
    }

    result.push('}');
    result
}

/// Format multiple entries to a single BibTeX string
///
/// Entries are separated by a blank line and the output ends with a final
/// newline so regenerated files diff cleanly.
pub fn format_entries(entries: &[BibTexEntry]) -> String {
    let mut result = entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n\n");
    if !result.is_empty() {
        result.push('\n');
    }
    result
}

/// Format a field value, choosing appropriate delimiters
fn format_field_value(value: &str) -> String {
    // Purely numeric values (years) go bare
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }

    let mut result = String::with_capacity(value.len() + 2);
    result.push('{');
    result.push_str(value);
    result.push('}');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::BibTexEntryType;

    #[test]
    fn test_format_simple_entry() {
        let mut entry = BibTexEntry::new("smith2024", BibTexEntryType::Article);
        entry.add_field("author", "John Smith");
        entry.add_field("title", "A Great Paper");
        entry.add_field("year", "2024");

        let formatted = format_entry(&entry);
        assert!(formatted.starts_with("@article{smith2024,"));
        assert!(formatted.contains("author = {John Smith}"));
        assert!(formatted.contains("title = {A Great Paper}"));
        // Year is numeric, so no braces
        assert!(formatted.contains("year = 2024,"));
        assert!(formatted.ends_with('}'));
    }

    #[test]
    fn test_format_entries_blank_line_separated() {
        let a = BibTexEntry::new("a", BibTexEntryType::Article);
        let b = BibTexEntry::new("b", BibTexEntryType::Unpublished);

        let formatted = format_entries(&[a, b]);
        assert!(formatted.contains("}\n\n@unpublished{b,"));
        assert!(formatted.ends_with("}\n"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_entries(&[]), "");
    }
}
