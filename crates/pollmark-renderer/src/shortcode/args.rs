//! Shortcode attribute parsing.
//!
//! Parses the `key="value" key2="value2"]` tail of a bracketed shortcode marker.

use std::collections::BTreeMap;

/// Attributes parsed from a shortcode marker.
///
/// Only double-quoted values are accepted. A backslash escapes the next
/// character, so `\"` yields a literal quote inside a value.
///
/// # Example
///
/// ```
/// use pollmark_renderer::shortcode::ShortcodeArgs;
///
/// let (args, consumed) = ShortcodeArgs::parse(r#" question="Useful?"] trailing"#).unwrap();
/// assert_eq!(args.get("question"), Some("Useful?"));
/// assert_eq!(consumed, 20);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortcodeArgs {
    attrs: BTreeMap<String, String>,
}

impl ShortcodeArgs {
    /// Parse attributes up to and including the closing `]`.
    ///
    /// Returns the attributes and the number of bytes consumed, or `None` when
    /// the syntax is malformed (unquoted or unterminated value, duplicate key,
    /// missing `]`). Callers treat `None` as "leave the marker as literal text".
    #[must_use]
    pub fn parse(s: &str) -> Option<(Self, usize)> {
        let mut args = Self::default();
        let mut pos = 0;

        loop {
            pos += leading_whitespace(&s[pos..]);
            let rest = &s[pos..];

            if rest.starts_with(']') {
                return Some((args, pos + 1));
            }

            let (key, value, consumed) = parse_key_value(rest)?;
            if args.attrs.insert(key, value).is_some() {
                return None;
            }
            pos += consumed;

            // Attributes must be separated by whitespace
            let next = s[pos..].chars().next()?;
            if !next.is_whitespace() && next != ']' {
                return None;
            }
        }
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Number of parsed attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if no attributes were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Consume the arguments, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.attrs
    }
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Parse `key="value"` from the start of `s`.
///
/// Whitespace around `=` is tolerated. Values may not span lines.
/// Returns (key, unescaped value, bytes consumed).
fn parse_key_value(s: &str) -> Option<(String, String, usize)> {
    let key_len = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    if key_len == 0 {
        return None;
    }
    let key = &s[..key_len];

    let mut pos = key_len;
    pos += leading_whitespace(&s[pos..]);
    if !s[pos..].starts_with('=') {
        return None;
    }
    pos += 1;
    pos += leading_whitespace(&s[pos..]);
    if !s[pos..].starts_with('"') {
        return None;
    }
    pos += 1;

    let mut value = String::new();
    let mut escaped = false;
    for (i, c) in s[pos..].char_indices() {
        if c == '\n' {
            return None;
        }
        if escaped {
            value.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return Some((key.to_owned(), value, pos + i + 1)),
            _ => value.push(c),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_attribute() {
        let (args, consumed) = ShortcodeArgs::parse(r#" question="Useful?"]"#).unwrap();
        assert_eq!(args.get("question"), Some("Useful?"));
        assert_eq!(args.len(), 1);
        assert_eq!(consumed, 20);
    }

    #[test]
    fn test_no_attributes() {
        let (args, consumed) = ShortcodeArgs::parse("]").unwrap();
        assert!(args.is_empty());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_multiple_attributes() {
        let (args, _) = ShortcodeArgs::parse(r#" question="A?" extra="b"]"#).unwrap();
        assert_eq!(args.get("question"), Some("A?"));
        assert_eq!(args.get("extra"), Some("b"));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let (args, _) = ShortcodeArgs::parse(r#" question = "Spaced?" ]"#).unwrap();
        assert_eq!(args.get("question"), Some("Spaced?"));
    }

    #[test]
    fn test_escaped_quote() {
        let (args, _) = ShortcodeArgs::parse(r#" question="Say \"hi\"?"]"#).unwrap();
        assert_eq!(args.get("question"), Some(r#"Say "hi"?"#));
    }

    #[test]
    fn test_bracket_inside_value() {
        let (args, consumed) = ShortcodeArgs::parse(r#" question="Is [x] ok?"] rest"#).unwrap();
        assert_eq!(args.get("question"), Some("Is [x] ok?"));
        assert_eq!(consumed, 23);
    }

    #[test]
    fn test_missing_closing_quote() {
        assert!(ShortcodeArgs::parse(r#" question="Useful?]"#).is_none());
    }

    #[test]
    fn test_unquoted_value() {
        assert!(ShortcodeArgs::parse(" question=Useful?]").is_none());
    }

    #[test]
    fn test_single_quoted_value() {
        assert!(ShortcodeArgs::parse(" question='Useful?']").is_none());
    }

    #[test]
    fn test_value_cannot_span_lines() {
        assert!(ShortcodeArgs::parse(" question=\"first\nsecond\"]").is_none());
    }

    #[test]
    fn test_duplicate_key() {
        assert!(ShortcodeArgs::parse(r#" question="a" question="b"]"#).is_none());
    }

    #[test]
    fn test_attributes_must_be_separated() {
        assert!(ShortcodeArgs::parse(r#" a="1"b="2"]"#).is_none());
    }

    #[test]
    fn test_missing_closing_bracket() {
        assert!(ShortcodeArgs::parse(r#" question="Useful?""#).is_none());
    }

    #[test]
    fn test_into_map_is_sorted() {
        let (args, _) = ShortcodeArgs::parse(r#" zeta="1" alpha="2"]"#).unwrap();
        let keys: Vec<_> = args.into_map().into_keys().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
