/// Returns the longest prefix of `value` holding at most `max_chars` characters.
///
/// Counts Unicode scalar values rather than bytes, so the prefix never splits a character.
///
/// # Arguments
/// - `value` - Text to truncate
/// - `max_chars` - Maximum number of characters to keep
///
/// # Returns
/// - `&str` - `value` itself when short enough, otherwise its first `max_chars` characters
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Escapes the characters that are significant in HTML text and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
