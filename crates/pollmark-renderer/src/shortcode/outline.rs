//! Shortcode outline and counts for status displays.

use super::{QuestionCounter, QuestionId, ShortcodeKind, recognize};

/// Number of recognized shortcodes per kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShortcodeCounts {
    /// Number of question shortcodes.
    pub questions: usize,
    /// Number of section shortcodes.
    pub sections: usize,
}

impl ShortcodeCounts {
    /// Total number of shortcodes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions + self.sections
    }
}

/// Count recognized shortcodes in `text`.
#[must_use]
pub fn count_shortcodes(text: &str) -> ShortcodeCounts {
    recognize(text)
        .iter()
        .fold(ShortcodeCounts::default(), |mut counts, occurrence| {
            match occurrence.kind {
                ShortcodeKind::Question => counts.questions += 1,
                ShortcodeKind::Section => counts.sections += 1,
            }
            counts
        })
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OutlineEntry {
    /// Shortcode kind.
    pub kind: ShortcodeKind,
    /// Line where the shortcode starts (1-indexed).
    pub line: usize,
    /// Question label, or the first non-empty line of a section.
    pub label: String,
    /// Identifier the question receives when the document is rendered.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub question_id: Option<QuestionId>,
}

/// Build a source-ordered outline of all shortcodes in `text`.
///
/// Question identifiers match those assigned by [`render`](crate::render)
/// for the same text.
///
/// # Example
///
/// ```
/// use pollmark_renderer::shortcode::outline;
///
/// let entries = outline("# Doc\n\n[yesno-question question=\"Ready?\"]");
/// assert_eq!(entries[0].line, 3);
/// assert_eq!(entries[0].label, "Ready?");
/// assert_eq!(entries[0].question_id.unwrap().to_string(), "q1");
/// ```
#[must_use]
pub fn outline(text: &str) -> Vec<OutlineEntry> {
    let mut counter = QuestionCounter::default();

    recognize(text)
        .into_iter()
        .map(|occurrence| {
            let line = line_number(text, occurrence.span.start);
            match occurrence.kind {
                ShortcodeKind::Question => OutlineEntry {
                    kind: ShortcodeKind::Question,
                    line,
                    label: occurrence.label().unwrap_or_default().to_owned(),
                    question_id: Some(counter.next_id()),
                },
                ShortcodeKind::Section => OutlineEntry {
                    kind: ShortcodeKind::Section,
                    line,
                    label: section_label(occurrence.inner_content.as_deref().unwrap_or_default()),
                    question_id: None,
                },
            }
        })
        .collect()
}

fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// First non-empty line of a section, without heading markers.
fn section_label(inner: &str) -> String {
    inner
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches('#').trim().to_owned())
        .unwrap_or_default()
}
