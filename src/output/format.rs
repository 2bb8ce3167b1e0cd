//! Display formatting for exported fields

/// Default maximum description length
pub const DEFAULT_DESCRIPTION_LENGTH: usize = 80;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max_length` characters.
///
/// Absent text becomes an empty string. Text that already fits is returned
/// unchanged. Longer text keeps its first `max_length - 3` characters followed
/// by `...`. Lengths count `char`s, not bytes.
pub fn truncate(text: Option<&str>, max_length: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };

    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.extend(ELLIPSIS.chars().take(max_length - keep));
    truncated
}
