//! RFC 5988 `Link` header parsing
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static LINK_ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<([^<>]*)>\s*;\s*rel="([^"]+)"$"#).unwrap());

/// Parse a `Link` header into a map of relation name to URL.
///
/// Empty input yields an empty map. Any entry that is not of the form
/// `<url>; rel="name"` is an error. When a relation repeats, the last one
/// wins.
pub fn parse_link_header(header: &str) -> Result<HashMap<String, String>> {
    let mut links = HashMap::new();
    if header.trim().is_empty() {
        return Ok(links);
    }

    for entry in split_entries(header) {
        let entry = entry.trim();
        let captures = LINK_ENTRY_REGEX
            .captures(entry)
            .ok_or_else(|| Error::link_header(entry))?;
        links.insert(captures[2].to_string(), captures[1].to_string());
    }

    Ok(links)
}

/// Split on commas that sit outside `<...>`
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries
}
