//! HTML escaping.

use std::borrow::Cow;

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_is_borrowed() {
        assert!(matches!(escape("Soccer Analysis"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("Track & Field"), "Track &amp; Field");
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_combined() {
        assert_eq!(
            escape("<a href=\"x\">a & 'b'</a>"),
            "&lt;a href=&quot;x&quot;&gt;a &amp; &#39;b&#39;&lt;/a&gt;"
        );
    }
}
