//! Opaque HTML islands.
//!
//! Rendered shortcode HTML is swapped out for `{{SHORTCODE_N}}` placeholders
//! before the markdown passes run, so those passes never see (or rewrite) the
//! generated markup. The placeholders are substituted back afterwards in a
//! single pass.
//!
//! Placeholder text a user typed must survive untouched, so the tag is
//! widened with `X`s (`{{SHORTCODEX_N}}`, ...) until it no longer occurs in
//! the source. Only placeholders with this render's tag are restored.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches an island placeholder of any width and captures the `X` run and
/// the index.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{SHORTCODE(X*)_(\d+)\}\}").unwrap());

/// Collects rendered HTML fragments and hands out placeholders for them.
///
/// # Example
///
/// ```ignore
/// let mut islands = Islands::default();
/// let placeholder = islands.push("<div>widget</div>".to_owned());
/// assert_eq!(placeholder, "{{SHORTCODE_0}}");
/// assert_eq!(islands.restore("<p>x</p>\n{{SHORTCODE_0}}"), "<p>x</p>\n<div>widget</div>");
/// ```
#[derive(Debug, Default)]
pub(crate) struct Islands {
    fragments: Vec<String>,
    /// Number of `X`s appended to the placeholder tag.
    width: usize,
}

impl Islands {
    /// Islands whose placeholders cannot collide with text in `source`.
    pub(crate) fn for_source(source: &str) -> Self {
        let mut tag = String::from("{{SHORTCODE");
        while source.contains(&tag) {
            tag.push('X');
        }
        Self {
            fragments: Vec::new(),
            width: tag.len() - "{{SHORTCODE".len(),
        }
    }

    /// Store a fragment and return the placeholder standing in for it.
    pub(crate) fn push(&mut self, html: String) -> String {
        let placeholder = format!(
            "{{{{SHORTCODE{}_{}}}}}",
            "X".repeat(self.width),
            self.fragments.len()
        );
        self.fragments.push(html);
        placeholder
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Replace every placeholder this collection issued with its fragment.
    ///
    /// Substituted fragments are not rescanned. Placeholders with another
    /// tag width or an unknown index are left as they are.
    pub(crate) fn restore(&self, html: &str) -> String {
        if self.is_empty() {
            return html.to_owned();
        }

        PLACEHOLDER_RE
            .replace_all(html, |caps: &Captures| {
                Some(&caps[2])
                    .filter(|_| caps[1].len() == self.width)
                    .and_then(|index| index.parse::<usize>().ok())
                    .and_then(|index| self.fragments.get(index))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }
}

/// Check whether `text` contains an island placeholder.
pub(crate) fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_sequential_placeholders() {
        let mut islands = Islands::default();
        assert_eq!(islands.push("a".to_owned()), "{{SHORTCODE_0}}");
        assert_eq!(islands.push("b".to_owned()), "{{SHORTCODE_1}}");
        assert_eq!(islands.len(), 2);
    }

    #[test]
    fn test_restore() {
        let mut islands = Islands::default();
        let first = islands.push("<div>one</div>".to_owned());
        let second = islands.push("<div>two</div>".to_owned());

        let html = format!("{second}\n<p>mid</p>\n{first}");
        assert_eq!(
            islands.restore(&html),
            "<div>two</div>\n<p>mid</p>\n<div>one</div>"
        );
    }

    #[test]
    fn test_restore_does_not_rescan_fragments() {
        let mut islands = Islands::default();
        let first = islands.push("{{SHORTCODE_1}}".to_owned());
        islands.push("<b>nested</b>".to_owned());

        assert_eq!(islands.restore(&first), "{{SHORTCODE_1}}");
    }

    #[test]
    fn test_restore_unknown_index() {
        let mut islands = Islands::default();
        islands.push("x".to_owned());
        assert_eq!(islands.restore("{{SHORTCODE_7}}"), "{{SHORTCODE_7}}");
    }

    #[test]
    fn test_restore_empty_is_identity() {
        let islands = Islands::default();
        assert_eq!(islands.restore("{{SHORTCODE_0}}"), "{{SHORTCODE_0}}");
    }

    #[test]
    fn test_index_ten_is_not_confused_with_one() {
        let mut islands = Islands::default();
        for i in 0..11 {
            islands.push(format!("<i>{i}</i>"));
        }
        assert_eq!(islands.restore("{{SHORTCODE_10}}"), "<i>10</i>");
        assert_eq!(islands.restore("{{SHORTCODE_1}}"), "<i>1</i>");
    }

    #[test]
    fn test_for_source_without_placeholders() {
        let mut islands = Islands::for_source("plain {{text}}");
        assert_eq!(islands.push("a".to_owned()), "{{SHORTCODE_0}}");
    }

    #[test]
    fn test_for_source_widens_tag_past_literal_placeholders() {
        let source = "{{SHORTCODE_0}} and {{SHORTCODEX_1}}";
        let mut islands = Islands::for_source(source);

        assert_eq!(islands.push("<div>w</div>".to_owned()), "{{SHORTCODEXX_0}}");
        assert_eq!(
            islands.restore("{{SHORTCODE_0}} {{SHORTCODEX_0}} {{SHORTCODEXX_0}}"),
            "{{SHORTCODE_0}} {{SHORTCODEX_0}} <div>w</div>"
        );
    }

    #[test]
    fn test_contains_placeholder() {
        assert!(contains_placeholder("{{SHORTCODEXX_0}}"));
        assert!(contains_placeholder("text {{SHORTCODE_3}} text"));
        assert!(!contains_placeholder("{{SHORTCODE_}}"));
        assert!(!contains_placeholder("plain"));
    }
}
