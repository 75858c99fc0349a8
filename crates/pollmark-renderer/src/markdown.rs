//! Line-oriented markdown subset renderer.
//!
//! Applies ordered, non-recursive substitution passes to the whole text:
//!
//! 1. ATX headers (`#` to `######`)
//! 2. `**strong**`, then `*emphasis*`
//! 3. `` `inline code` ``
//! 4. `[label](url)` links
//! 5. `- ` unordered lists, one `<ul>` per contiguous run of items
//! 6. Paragraph wrapping on blank-line boundaries
//!
//! The order matters: paragraph wrapping runs last so block-level output from
//! earlier passes is recognized and left alone. This is not a CommonMark
//! implementation: there are no setext headers, fenced code blocks, nested
//! lists or escaping. Raw HTML passes through unchanged.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::islands::contains_placeholder;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.+)$").unwrap());

static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

/// Blank line: a newline, optional horizontal whitespace, another newline.
static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Tags that mark a block as already rendered.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "div", "p", "pre", "blockquote", "table",
    "script", "hr",
];

/// Render markdown text to HTML with all six passes.
///
/// # Example
///
/// ```
/// use pollmark_renderer::markdown;
///
/// let html = markdown::render("# Title\n\nSome **bold** text.");
/// assert_eq!(html, "<h1>Title</h1>\n<p>Some <strong>bold</strong> text.</p>");
/// ```
#[must_use]
pub fn render(text: &str) -> String {
    let text = normalize_newlines(text);
    let html = render_headers(&text);
    let html = render_emphasis(&html);
    let html = render_inline_code(&html);
    let html = render_links(&html);
    let html = render_lists(&html);
    wrap_paragraphs(&html)
}

/// Render only headers and paragraphs.
///
/// Used for the content of interactive sections, which intentionally skip
/// emphasis, code, links and lists.
#[must_use]
pub fn render_section_subset(text: &str) -> String {
    let text = normalize_newlines(text);
    wrap_paragraphs(&render_headers(&text))
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn render_headers(text: &str) -> String {
    HEADER_RE
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

fn render_emphasis(text: &str) -> String {
    let strong = STRONG_RE.replace_all(text, "<strong>$1</strong>");
    EMPHASIS_RE
        .replace_all(&strong, "<em>$1</em>")
        .into_owned()
}

fn render_inline_code(text: &str) -> String {
    CODE_RE.replace_all(text, "<code>$1</code>").into_owned()
}

fn render_links(text: &str) -> String {
    LINK_RE
        .replace_all(text, r#"<a href="$2">$1</a>"#)
        .into_owned()
}

/// Turn `- item` lines into `<li>` and wrap each contiguous run in `<ul>`.
fn render_lists(text: &str) -> String {
    let mut lines: Vec<Cow<'_, str>> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        match line.strip_prefix("- ").filter(|item| !item.is_empty()) {
            Some(item) => {
                if !in_list {
                    lines.push(Cow::Borrowed("<ul>"));
                    in_list = true;
                }
                lines.push(Cow::Owned(format!("<li>{item}</li>")));
            }
            None => {
                if in_list {
                    lines.push(Cow::Borrowed("</ul>"));
                    in_list = false;
                }
                lines.push(Cow::Borrowed(line));
            }
        }
    }
    if in_list {
        lines.push(Cow::Borrowed("</ul>"));
    }

    lines.join("\n")
}

/// Wrap blank-line separated blocks in `<p>`.
///
/// Blocks that start with a block-level tag or contain an island placeholder
/// are left untouched. Empty blocks are dropped.
fn wrap_paragraphs(text: &str) -> String {
    BLANK_LINE_RE
        .split(text)
        .filter_map(|block| {
            let trimmed = block.trim();
            if trimmed.is_empty() {
                None
            } else if starts_with_block_tag(trimmed) || contains_placeholder(trimmed) {
                Some(Cow::Borrowed(trimmed))
            } else {
                Some(Cow::Owned(format!("<p>{trimmed}</p>")))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn starts_with_block_tag(block: &str) -> bool {
    let Some(rest) = block.strip_prefix('<') else {
        return false;
    };
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let name = rest[..name_len].to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}
