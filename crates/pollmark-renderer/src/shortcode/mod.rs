//! Shortcode recognition and rendering.
//!
//! Pollmark documents support two bracket-delimited shortcodes:
//!
//! - **Question** (`[yesno-question question="..."]`): a self-closing marker that
//!   expands to an interactive yes/no widget.
//! - **Section** (`[interactivesection]` ... `[/interactivesection]`): a paired
//!   marker whose content is rendered inside a highlighted container.
//!
//! # Architecture
//!
//! Shortcodes are handled in two phases:
//!
//! 1. **Recognition** ([`recognize`]): scans raw text and returns an immutable,
//!    position-ordered list of [`ShortcodeOccurrence`]s. Nothing is rendered.
//! 2. **Rendering**: the [`Pipeline`](crate::Pipeline) walks the occurrences in
//!    source order, numbering questions as it goes, and replaces each span with
//!    an HTML island.
//!
//! Malformed markers are never reported as errors: they are simply not
//! recognized and stay in the document as literal text.

mod args;
mod outline;
pub(crate) mod question;
mod recognizer;
pub(crate) mod section;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

pub use args::ShortcodeArgs;
pub use outline::{OutlineEntry, ShortcodeCounts, count_shortcodes, outline};
pub use recognizer::recognize;

/// Opening marker of a question shortcode (attributes follow).
pub(crate) const QUESTION_TAG: &str = "[yesno-question";
/// Opening marker of a section shortcode.
pub(crate) const SECTION_OPEN: &str = "[interactivesection]";
/// Closing marker of a section shortcode.
pub(crate) const SECTION_CLOSE: &str = "[/interactivesection]";

/// The two shortcode forms understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShortcodeKind {
    /// `[yesno-question question="..."]`
    #[cfg_attr(feature = "serde", serde(rename = "yesno-question"))]
    Question,
    /// `[interactivesection]` ... `[/interactivesection]`
    #[cfg_attr(feature = "serde", serde(rename = "interactivesection"))]
    Section,
}

impl ShortcodeKind {
    /// All shortcode kinds, in library order.
    pub const ALL: [Self; 2] = [Self::Question, Self::Section];

    /// Shortcode name as written in source text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Question => "yesno-question",
            Self::Section => "interactivesection",
        }
    }

    /// Human-readable name for shortcode libraries.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Question => "Yes/No Question",
            Self::Section => "Interactive Section",
        }
    }

    /// One-line description for shortcode libraries.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Question => "Interactive binary choice component",
            Self::Section => "Highlighted content area",
        }
    }

    /// Snippet inserted by the editor when the shortcode is picked.
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::Question => r#"[yesno-question question="Your question here?"]"#,
            Self::Section => "[interactivesection]\nYour content here\n[/interactivesection]",
        }
    }
}

impl fmt::Display for ShortcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recognized shortcode in the source text.
///
/// Created by [`recognize`] and consumed once by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShortcodeOccurrence {
    /// Which shortcode was matched.
    pub kind: ShortcodeKind,
    /// Parsed attributes (`question` for questions, empty for sections).
    pub attributes: BTreeMap<String, String>,
    /// Text between the opening and closing markers (sections only).
    pub inner_content: Option<String>,
    /// Byte range of the whole marker in the source text.
    pub span: Range<usize>,
}

impl ShortcodeOccurrence {
    pub(crate) fn question(attributes: BTreeMap<String, String>, span: Range<usize>) -> Self {
        Self {
            kind: ShortcodeKind::Question,
            attributes,
            inner_content: None,
            span,
        }
    }

    pub(crate) fn section(inner_content: &str, span: Range<usize>) -> Self {
        Self {
            kind: ShortcodeKind::Section,
            attributes: BTreeMap::new(),
            inner_content: Some(inner_content.to_owned()),
            span,
        }
    }

    /// Question label, if this is a question occurrence.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.kind {
            ShortcodeKind::Question => self.attributes.get("question").map(String::as_str),
            ShortcodeKind::Section => None,
        }
    }

    /// Byte range of the content between section markers.
    #[must_use]
    pub fn inner_span(&self) -> Option<Range<usize>> {
        match self.kind {
            ShortcodeKind::Section => {
                Some(self.span.start + SECTION_OPEN.len()..self.span.end - SECTION_CLOSE.len())
            }
            ShortcodeKind::Question => None,
        }
    }

    /// Check whether `other` lies entirely inside this occurrence.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.span.start < other.span.start && other.span.end <= self.span.end
    }

    /// The source text this occurrence was recognized from.
    ///
    /// Returns `None` if `source` is not the text that was scanned.
    #[must_use]
    pub fn source<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.span.clone())
    }
}

/// Per-render question identifier (`q1`, `q2`, ...).
///
/// Identifiers are assigned in source order and start at 1 for every render
/// call. They are reproducible for identical input but shift when earlier
/// questions are added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(usize);

impl QuestionId {
    /// Create an identifier from its 1-based sequence number.
    #[must_use]
    pub fn new(number: usize) -> Self {
        Self(number)
    }

    /// 1-based sequence number.
    #[must_use]
    pub fn number(self) -> usize {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QuestionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sequential question numbering scoped to one render call.
#[derive(Debug, Default)]
pub(crate) struct QuestionCounter {
    issued: usize,
}

impl QuestionCounter {
    pub(crate) fn next_id(&mut self) -> QuestionId {
        self.issued += 1;
        QuestionId(self.issued)
    }

    pub(crate) fn issued(&self) -> usize {
        self.issued
    }
}
