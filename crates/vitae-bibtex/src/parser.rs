//! BibTeX parser implementation using nom
//!
//! A tolerant parser for hand-curated bibliography files:
//! - All standard entry types
//! - Braced and quoted field values, including nested braces
//! - `@string`, `@preamble`, and `@comment` blocks are recognized and skipped
//! - Malformed entries are recorded as errors and parsing resumes at the
//!   next `@`
//!
//! String macros are not expanded; the sync pipeline only reads literal
//! `doi` and `title` fields from manual files.

use nom::{
    character::complete::{char, multispace0},
    bytes::complete::take_while1,
    IResult,
};

use super::entry::{BibTexEntry, BibTexEntryType};

/// Parse error information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTexParseError {
    pub line: u32,
    pub message: String,
}

/// Result of parsing a BibTeX file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BibTexParseResult {
    pub entries: Vec<BibTexEntry>,
    pub errors: Vec<BibTexParseError>,
}

/// Error type for parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid BibTeX syntax")]
    InvalidSyntax,
}

/// Parse a BibTeX string
pub fn parse(input: &str) -> Result<BibTexParseResult, ParseError> {
    let mut result = BibTexParseResult::default();

    let mut remaining = input;
    let mut current_line = 1u32;

    while !remaining.is_empty() {
        let (rest, skipped) = skip_whitespace_and_comments(remaining);
        current_line += skipped.matches('\n').count() as u32;
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        if remaining.starts_with('@') {
            match parse_at_entry(remaining) {
                Ok((rest, entry)) => {
                    let consumed = &remaining[..remaining.len() - rest.len()];
                    current_line += consumed.matches('\n').count() as u32;
                    if let Some(entry) = entry {
                        result.entries.push(entry);
                    }
                    remaining = rest;
                }
                Err(_) => {
                    result.errors.push(BibTexParseError {
                        line: current_line,
                        message: "failed to parse entry".to_string(),
                    });
                    // Recover: skip to the next @ or end of input
                    if let Some(pos) = remaining[1..].find('@') {
                        remaining = &remaining[pos + 1..];
                    } else {
                        break;
                    }
                }
            }
        } else {
            // Stray text between entries
            if let Some(pos) = remaining.find('@') {
                remaining = &remaining[pos..];
            } else {
                break;
            }
        }
    }

    Ok(result)
}

/// Skip whitespace and `%` line comments, returning (rest, skipped)
fn skip_whitespace_and_comments(input: &str) -> (&str, &str) {
    let mut pos = 0;
    let bytes = input.as_bytes();

    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
        } else if bytes[pos] == b'%' {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
        } else {
            break;
        }
    }

    (&input[pos..], &input[..pos])
}

/// Parse one `@...` block. Returns `None` for string/preamble/comment blocks.
fn parse_at_entry(input: &str) -> IResult<&str, Option<BibTexEntry>> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, entry_type) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;

    match entry_type.to_lowercase().as_str() {
        "string" | "preamble" | "comment" => {
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = parse_braced_content(rest)?;
            Ok((rest, None))
        }
        _ => {
            let (rest, entry) = parse_entry_body(rest, entry_type)?;
            Ok((rest, Some(entry)))
        }
    }
}

/// Parse an entry body: `{key, field = value, ...}`
fn parse_entry_body<'a>(input: &'a str, entry_type: &str) -> IResult<&'a str, BibTexEntry> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;

    let (rest, cite_key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./+".contains(c))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(',')(rest)?;

    let (rest, fields) = parse_fields(rest)?;

    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;

    let mut entry = BibTexEntry::new(cite_key, BibTexEntryType::from_str(entry_type));
    for (key, value) in fields {
        entry.add_field(key, value);
    }

    Ok((rest, entry))
}

/// Parse fields within an entry
fn parse_fields(input: &str) -> IResult<&str, Vec<(String, String)>> {
    let mut fields = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;

        if rest.starts_with('}') {
            return Ok((rest, fields));
        }

        match parse_single_field(rest) {
            Ok((rest, (key, value))) => {
                fields.push((key, value));

                // Skip optional trailing comma
                let (rest, _) = multispace0(rest)?;
                remaining = rest.strip_prefix(',').unwrap_or(rest);
            }
            Err(_) => {
                // No more fields
                return Ok((remaining, fields));
            }
        }
    }
}

/// Parse a single `key = value` field
fn parse_single_field(input: &str) -> IResult<&str, (String, String)> {
    let (rest, key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_field_value(rest)?;

    Ok((rest, (key.to_string(), value)))
}

/// Parse a field value: braced, quoted, or a bare token
fn parse_field_value(input: &str) -> IResult<&str, String> {
    if input.starts_with('{') {
        let (rest, value) = parse_braced_content(input)?;
        Ok((rest, value))
    } else if input.starts_with('"') {
        parse_quoted_content(input)
    } else {
        let (rest, value) = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.')(input)?;
        Ok((rest, value.to_string()))
    }
}

/// Parse brace-delimited content with nesting, returning the inner text
fn parse_braced_content(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '{')) => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    }

    let mut depth = 1usize;
    for (i, c) in chars {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], input[1..i].to_string()));
                }
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

/// Parse quote-delimited content (braces inside quotes protect `"`)
fn parse_quoted_content(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    }

    let mut depth = 0usize;
    for (i, c) in chars {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => {
                return Ok((&input[i + 1..], input[1..i].to_string()));
            }
            _ => {}
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}
