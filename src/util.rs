/// Shorten `s` to at most `max_chars` characters, marking the cut with "…".
/// Counts characters, not bytes, so CJK names are handled correctly.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Remove ANSI CSI escape sequences (`ESC [ ... final-byte`) from a line of
/// tool output.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        if chars.peek() != Some(&'[') {
            continue;
        }
        chars.next();
        for next in chars.by_ref() {
            if ('@'..='~').contains(&next) {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_short_unchanged() {
        assert_eq!(truncate_str("Alice", 8), "Alice");
        assert_eq!(truncate_str("Alice", 5), "Alice");
    }

    #[test]
    fn truncate_str_long_gets_ellipsis() {
        let result = truncate_str("Bartholomew", 6);
        assert_eq!(result, "Barth…");
        assert_eq!(result.chars().count(), 6);
    }

    #[test]
    fn truncate_str_cjk() {
        assert_eq!(truncate_str("欧阳娜娜", 4), "欧阳娜娜");
        assert_eq!(truncate_str("司马相如先生", 3), "司马…");
    }

    #[test]
    fn truncate_str_tiny_limits() {
        assert_eq!(truncate_str("Alice", 0), "");
        assert_eq!(truncate_str("Alice", 1), "…");
    }

    #[test]
    fn strip_ansi_plain_unchanged() {
        assert_eq!(strip_ansi("DP-1 (enabled)"), "DP-1 (enabled)");
    }

    #[test]
    fn strip_ansi_removes_color_codes() {
        assert_eq!(
            strip_ansi("\u{1b}[1;32mDP-1\u{1b}[0m (enabled)"),
            "DP-1 (enabled)"
        );
    }

    #[test]
    fn strip_ansi_lone_escape_dropped() {
        assert_eq!(strip_ansi("a\u{1b}b"), "ab");
    }
}
