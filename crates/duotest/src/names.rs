//! Display names recovered from the source text of a test list.

/// Trim surrounding whitespace and strip one leading `&`.
///
/// `"  &Fixture::add "` becomes `"Fixture::add"`.
pub fn display_name(entry: &str) -> &str {
    let trimmed = entry.trim();
    match trimmed.strip_prefix('&') {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

/// Split a comma-joined list of entries into display names.
///
/// Empty text yields no names. A trailing comma does not produce an
/// empty entry.
pub fn split_names(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = text.split(',').map(display_name).collect();
    if names.last().is_some_and(|last| last.is_empty()) {
        names.pop();
    }
    names
}
