//! Markup escaping for untrusted text
//!
//! Escapes the five markup-significant characters so the result can be
//! embedded verbatim in HTML element content or a quoted attribute. Applied
//! once by the validator; applying it again double-escapes `&`.

/// Escape `&`, `<`, `>`, `"` and `'`
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Trim surrounding whitespace, then escape
pub fn sanitize_text(raw: &str) -> String {
    escape_markup(raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_all_specials() {
        assert_eq!(
            escape_markup(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_markup_plain_text_unchanged() {
        assert_eq!(escape_markup("cats 42"), "cats 42");
    }

    #[test]
    fn test_sanitize_text_trims_before_escaping() {
        assert_eq!(sanitize_text("  <b>  \n"), "&lt;b&gt;");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_double_escape_is_distinguishable() {
        let once = escape_markup("a & b");
        let twice = escape_markup(&once);
        assert_eq!(once, "a &amp; b");
        assert_eq!(twice, "a &amp;amp; b");
    }
}
