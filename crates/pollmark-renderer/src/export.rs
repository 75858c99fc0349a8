//! Standalone document export.

use crate::util::escape_html;

/// Title used when a document has none.
pub const DEFAULT_TITLE: &str = "MDX Document";

/// Stem used for download file names when a document has no title.
pub const DEFAULT_FILE_STEM: &str = "document";

const STYLESHEET: &str = "\
    body { font-family: system-ui, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 2rem; }
    .interactive-section-highlight { background: linear-gradient(90deg, rgba(34, 197, 94, 0.1), rgba(34, 197, 94, 0.05)); border-left: 3px solid #22c55e; padding: 1.5rem; border-radius: 0.5rem; margin: 1.5rem 0; }
    .yesno-question-component { background: #1f2937; color: #f9fafb; border: 1px solid #22c55e; border-radius: 0.5rem; padding: 1rem; margin: 1rem 0; }
    .yesno-question-buttons { margin-bottom: 0.75rem; }
    .yesno-question-count { font-size: 0.875rem; color: #9ca3af; }
    button { background: #22c55e; color: white; border: none; padding: 0.5rem 1rem; border-radius: 0.375rem; margin: 0 0.5rem 0 0; cursor: pointer; }
    button:hover { background: #16a34a; }
    button:disabled { opacity: 0.6; cursor: default; }
    h1 { font-size: 2rem; font-weight: bold; margin-bottom: 1.5rem; }
    h2 { font-size: 1.5rem; font-weight: 600; margin-bottom: 1rem; }
    p { margin-bottom: 1rem; }
    strong { font-weight: 600; }
    em { font-style: italic; }
    code { background: #374151; color: #fbbf24; padding: 0.125rem 0.5rem; border-radius: 0.25rem; font-size: 0.875rem; }
    a { color: #22c55e; }
    a:hover { text-decoration: underline; }
    ul { list-style: disc; padding-left: 1.5rem; margin-bottom: 2rem; }
    li { margin-bottom: 0.5rem; }";

/// Wrap rendered body HTML in a complete HTML page.
///
/// An empty `title` falls back to [`DEFAULT_TITLE`]. The title is escaped;
/// `body_html` is inserted as is.
///
/// # Example
///
/// ```
/// use pollmark_renderer::export::standalone_document;
///
/// let page = standalone_document("Notes & Polls", "<p>Hi</p>");
/// assert!(page.starts_with("<!DOCTYPE html>"));
/// assert!(page.contains("<title>Notes &amp; Polls</title>"));
/// ```
#[must_use]
pub fn standalone_document(title: &str, body_html: &str) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{STYLESHEET}
  </style>
</head>
<body>
{body_html}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Build a download file name `{title}.{extension}`.
///
/// Characters that are unsafe in file names or `Content-Disposition`
/// headers are replaced with `_`. An empty title falls back to
/// [`DEFAULT_FILE_STEM`].
///
/// # Example
///
/// ```
/// use pollmark_renderer::export::export_file_name;
///
/// assert_eq!(export_file_name("Weekly poll", "html"), "Weekly poll.html");
/// assert_eq!(export_file_name("", "mdx"), "document.mdx");
/// assert_eq!(export_file_name("a/b\"c", "mdx"), "a_b_c.mdx");
/// ```
#[must_use]
pub fn export_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        format!("{DEFAULT_FILE_STEM}.{extension}")
    } else {
        format!("{stem}.{extension}")
    }
}
