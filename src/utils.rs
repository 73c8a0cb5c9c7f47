//! Small helpers shared across the pipeline.

use url::Url;

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest character boundary
/// at or below `max` and get a `"…(+N bytes)"` marker.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Whether `link` already carries a scheme (`https:`, `mailto:`, ...).
///
/// Relative paths, protocol-relative links and bare host names do not.
pub fn looks_absolute(link: &str) -> bool {
    Url::parse(link).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // "é" is two bytes; cutting at 1 would split it
        assert_eq!(truncate_for_log("éa", 1), "…(+3 bytes)");
    }

    #[test]
    fn test_looks_absolute() {
        assert!(looks_absolute("https://example.com/a"));
        assert!(looks_absolute("http://example.com"));
        assert!(looks_absolute("mailto:press@example.com"));
        assert!(!looks_absolute("/news/1"));
        assert!(!looks_absolute("news/1"));
        assert!(!looks_absolute("//cdn.example.com/a"));
        assert!(!looks_absolute(""));
    }
}
