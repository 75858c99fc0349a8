//! Render pipeline: shortcodes to islands, markdown, then restore.

use crate::error::RenderError;
use crate::islands::Islands;
use crate::markdown;
use crate::shortcode::question::{self, activation_script};
use crate::shortcode::{QuestionCounter, ShortcodeKind, ShortcodeOccurrence, recognize, section};

/// Options controlling how documents are rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Base path of the response API used by the activation script.
    pub api_base: String,
    /// Append the activation script to the rendered HTML.
    ///
    /// Hosts that inject [`activation_script`] themselves (for example a
    /// live preview) set this to `false` and consult
    /// [`RenderOutput::needs_activation_script`].
    pub embed_activation_script: bool,
    /// HTML-escape question labels. Off by default: labels are trusted
    /// author text, like the rest of the markdown.
    pub escape_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            api_base: "/api".to_owned(),
            embed_activation_script: true,
            escape_labels: false,
        }
    }
}

impl RenderOptions {
    /// Set the response API base path.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Enable or disable embedding the activation script.
    #[must_use]
    pub fn with_activation_script(mut self, embed: bool) -> Self {
        self.embed_activation_script = embed;
        self
    }

    /// Enable or disable escaping of question labels.
    #[must_use]
    pub fn with_escaped_labels(mut self, escape: bool) -> Self {
        self.escape_labels = escape;
        self
    }
}

/// Result of rendering one document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderOutput {
    /// Final HTML.
    pub html: String,
    /// At least one question widget was rendered, so the page needs the
    /// activation script. Already satisfied when the script is embedded.
    pub needs_activation_script: bool,
}

/// Document renderer.
///
/// Stateless apart from its options: every call starts question numbering
/// at `q1` and owns its own islands, so one pipeline can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use pollmark_renderer::{Pipeline, RenderOptions};
///
/// let pipeline = Pipeline::new(RenderOptions::default().with_activation_script(false));
/// let output = pipeline
///     .render("[yesno-question question=\"Ready?\"]", "doc-1")
///     .unwrap();
///
/// assert!(output.needs_activation_script);
/// assert!(output.html.contains("data-testid=\"yesno-question-q1\""));
/// assert!(!output.html.contains("<script"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    options: RenderOptions,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options this pipeline renders with.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `source` as the document `document_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidDocumentId`] if `document_id` cannot be
    /// embedded in widget attributes and API URLs. Malformed shortcodes are
    /// not errors.
    pub fn render(&self, source: &str, document_id: &str) -> Result<RenderOutput, RenderError> {
        validate_document_id(document_id)?;

        let occurrences = recognize(source);
        let mut counter = QuestionCounter::default();
        let mut islands = Islands::for_source(source);
        let mut text = String::with_capacity(source.len());
        let mut cursor = 0;

        let mut iter = occurrences.iter().peekable();
        while let Some(occurrence) = iter.next() {
            let html = match occurrence.kind {
                ShortcodeKind::Question => {
                    self.render_question(occurrence, document_id, &mut counter)
                }
                ShortcodeKind::Section => {
                    let mut nested = Vec::new();
                    while let Some(inner) = iter.next_if(|next| occurrence.contains(next)) {
                        nested.push(inner);
                    }
                    self.render_section(source, occurrence, &nested, document_id, &mut counter)
                }
            };

            text.push_str(&source[cursor..occurrence.span.start]);
            text.push_str(&islands.push(html));
            cursor = occurrence.span.end;
        }
        text.push_str(&source[cursor..]);

        let mut html = islands.restore(&markdown::render(&text));
        let needs_activation_script = counter.issued() > 0;
        if needs_activation_script && self.options.embed_activation_script {
            html.push('\n');
            html.push_str(&activation_script(&self.options.api_base));
        }

        tracing::debug!(
            document_id,
            shortcodes = occurrences.len(),
            islands = islands.len(),
            questions = counter.issued(),
            "Rendered document"
        );

        Ok(RenderOutput {
            html,
            needs_activation_script,
        })
    }

    fn render_question(
        &self,
        occurrence: &ShortcodeOccurrence,
        document_id: &str,
        counter: &mut QuestionCounter,
    ) -> String {
        question::render_widget(
            document_id,
            counter.next_id(),
            occurrence.label().unwrap_or_default(),
            self.options.escape_labels,
        )
    }

    /// Render a section with its nested questions as local islands.
    ///
    /// Section content only gets the header and paragraph passes.
    fn render_section(
        &self,
        source: &str,
        occurrence: &ShortcodeOccurrence,
        nested: &[&ShortcodeOccurrence],
        document_id: &str,
        counter: &mut QuestionCounter,
    ) -> String {
        let Some(inner) = occurrence.inner_span() else {
            return String::new();
        };

        let mut islands = Islands::for_source(source);
        let mut text = String::with_capacity(inner.len());
        let mut cursor = inner.start;
        for question in nested {
            text.push_str(&source[cursor..question.span.start]);
            let widget = self.render_question(question, document_id, counter);
            text.push_str(&islands.push(widget));
            cursor = question.span.end;
        }
        text.push_str(&source[cursor..inner.end]);

        let body = islands.restore(&markdown::render_section_subset(&text));
        section::render(body.trim())
    }
}

/// Render `source` with default options.
///
/// # Errors
///
/// Returns [`RenderError::InvalidDocumentId`] for an unusable document id.
///
/// # Example
///
/// ```
/// let output = pollmark_renderer::render("# Title\n\nHello *world*.", "default").unwrap();
/// assert_eq!(output.html, "<h1>Title</h1>\n<p>Hello <em>world</em>.</p>");
/// assert!(!output.needs_activation_script);
/// ```
pub fn render(source: &str, document_id: &str) -> Result<RenderOutput, RenderError> {
    Pipeline::default().render(source, document_id)
}

fn validate_document_id(id: &str) -> Result<(), RenderError> {
    let reason = if id.is_empty() {
        Some("must not be empty")
    } else if id.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if id.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else if id.contains(['/', '\\', '?', '#']) {
        Some("must not contain path or URL delimiters")
    } else if id.contains(['"', '\'', '<', '>', '&']) {
        Some("must not contain HTML special characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RenderError::InvalidDocumentId {
            id: id.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}
