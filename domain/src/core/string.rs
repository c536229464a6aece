//! String helpers for log lines and console excerpts.

/// Shorten `s` to at most `max_chars` characters, appending `…` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}
