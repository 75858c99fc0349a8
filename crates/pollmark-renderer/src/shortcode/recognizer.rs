//! Shortcode recognition.
//!
//! A single left-to-right scan over the raw text. Question markers are matched
//! first at each `[` so that their quoted labels are never scanned for section
//! markers.

use super::{
    QUESTION_TAG, SECTION_CLOSE, SECTION_OPEN, ShortcodeArgs, ShortcodeOccurrence,
};

/// Recognize all shortcodes in `text`, ordered by ascending source offset.
///
/// - A closing section marker ends the nearest preceding unmatched opening
///   marker. Sections never nest: an opening marker that is followed by another
///   opening marker before any close is left as literal text.
/// - Unterminated openings and stray closings are left as literal text.
/// - Questions inside a section are reported as separate occurrences whose
///   spans lie inside the section span.
///
/// # Example
///
/// ```
/// use pollmark_renderer::shortcode::{ShortcodeKind, recognize};
///
/// let text = "[interactivesection]\nIntro\n[/interactivesection]\n\n[yesno-question question=\"Ok?\"]";
/// let occurrences = recognize(text);
///
/// assert_eq!(occurrences.len(), 2);
/// assert_eq!(occurrences[0].kind, ShortcodeKind::Section);
/// assert_eq!(occurrences[1].label(), Some("Ok?"));
/// ```
#[must_use]
pub fn recognize(text: &str) -> Vec<ShortcodeOccurrence> {
    let mut occurrences = Vec::new();
    let mut pending_open: Option<usize> = None;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('[') {
        let start = pos + offset;
        let rest = &text[start..];

        if let Some(occurrence) = parse_question(rest, start) {
            pos = occurrence.span.end;
            occurrences.push(occurrence);
        } else if rest.starts_with(SECTION_OPEN) {
            // A newer opening supersedes an unmatched older one
            pending_open = Some(start);
            pos = start + SECTION_OPEN.len();
        } else if rest.starts_with(SECTION_CLOSE) {
            let end = start + SECTION_CLOSE.len();
            if let Some(open) = pending_open.take() {
                let inner = &text[open + SECTION_OPEN.len()..start];
                occurrences.push(ShortcodeOccurrence::section(inner, open..end));
            }
            pos = end;
        } else {
            pos = start + 1;
        }
    }

    // Sections are pushed when their close is found; restore source order
    occurrences.sort_by_key(|o| o.span.start);

    tracing::trace!(count = occurrences.len(), "Recognized shortcodes");
    occurrences
}

/// Parse a question marker at the start of `rest`.
///
/// The marker must carry exactly one non-empty `question` attribute.
fn parse_question(rest: &str, start: usize) -> Option<ShortcodeOccurrence> {
    let after_tag = rest.strip_prefix(QUESTION_TAG)?;
    if !after_tag.starts_with(char::is_whitespace) {
        return None;
    }

    let (args, consumed) = ShortcodeArgs::parse(after_tag)?;
    if args.len() != 1 || args.get("question").is_none_or(|q| q.trim().is_empty()) {
        return None;
    }

    let end = start + QUESTION_TAG.len() + consumed;
    Some(ShortcodeOccurrence::question(args.into_map(), start..end))
}
