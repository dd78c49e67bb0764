//! Rationale → principle text.

/// Reduce a rationale to its leading sentence.
///
/// Whitespace is collapsed and the result is cut to at most `max_len`
/// characters (never splitting a UTF-8 sequence). Returns `None` when the
/// rationale has no content.
pub fn abstract_principle(rationale: &str, max_len: usize) -> Option<String> {
    let normalized = rationale.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }

    let first = match normalized.find(|c| matches!(c, '.' | '!' | '?' | ';')) {
        Some(end) => &normalized[..end],
        None => normalized.as_str(),
    };
    let first = first.trim();
    if first.is_empty() {
        return None;
    }

    Some(first.chars().take(max_len).collect())
}
