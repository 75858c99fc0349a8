//! Escaping helpers shared by the shortcode renderers and HTML export.

/// Escape special HTML characters.
///
/// # Example
///
/// ```
/// use pollmark_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Quote a string as a JavaScript string literal safe to embed in `<script>`.
///
/// `<` is written as `\u003c` so the literal can never close the script element.
pub(crate) fn js_string_literal(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '<' => result.push_str("\\u003c"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", u32::from(c))),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_plain() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_escape_html_quotes() {
        assert_eq!(escape_html("it's \"quoted\""), "it&#x27;s &quot;quoted&quot;");
    }

    #[test]
    fn test_js_string_literal() {
        assert_eq!(js_string_literal("/api"), "\"/api\"");
        assert_eq!(js_string_literal("a\"b\\c"), r#""a\"b\\c""#);
    }

    #[test]
    fn test_js_string_literal_cannot_close_script() {
        let literal = js_string_literal("</script><script>alert(1)");
        assert!(!literal.contains("</script>"));
        assert!(literal.starts_with("\"\\u003c/script>"));
    }

    #[test]
    fn test_js_string_literal_control_chars() {
        assert_eq!(js_string_literal("a\tb"), "\"a\\u0009b\"");
        assert_eq!(js_string_literal("a\nb"), "\"a\\nb\"");
    }
}
