//! Text normalization for dedup keys and cite keys

use unicode_normalization::UnicodeNormalization;

/// Normalize a title for duplicate comparison
///
/// - Converts to lowercase
/// - Strips everything outside `[a-z0-9 ]`
/// - Collapses whitespace
///
/// This must stay byte-for-byte stable across runs: the normalized title is
/// both a dedup key and part of generated cite keys.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_ascii_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();

    collapse_whitespace(&stripped).trim().to_string()
}

/// Strip the resolver prefix from a DOI and lowercase it
///
/// OpenAlex reports DOIs as full `https://doi.org/...` URLs; manual files
/// usually carry the bare form. Both normalize to the same key.
pub fn clean_doi(doi: &str) -> String {
    doi.trim()
        .to_lowercase()
        .trim_start_matches("https://doi.org/")
        .trim_start_matches("http://doi.org/")
        .to_string()
}

/// Collapse multiple whitespace characters into a single space
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c == ' ' {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}

/// Extract a lowercased, ASCII-folded surname from an author display name
///
/// Takes the last whitespace-separated token ("First Last" form, which is
/// what OpenAlex display names use) and folds diacritics so the result is
/// safe in a cite key.
pub fn surname_for_key(display_name: &str) -> Option<String> {
    let last = display_name.split_whitespace().last()?;
    let folded: String = last
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    if folded.is_empty() {
        None
    } else {
        Some(folded)
    }
}
