//! Interactive section container.

/// Wrap already-rendered section content in the highlight container.
pub(crate) fn render(body: &str) -> String {
    format!(
        "<div class=\"interactive-section-highlight\" data-testid=\"interactive-section\">\n{body}\n</div>"
    )
}
