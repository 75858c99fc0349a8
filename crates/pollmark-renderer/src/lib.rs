//! Shortcode-aware markdown renderer for Pollmark documents.
//!
//! Pollmark documents are markdown with two embedded shortcodes: yes/no
//! questions that become interactive widgets, and highlighted interactive
//! sections. This crate turns document text into HTML.
//!
//! # Architecture
//!
//! Rendering is a pure, synchronous pipeline:
//!
//! 1. [`shortcode::recognize`] scans the raw text into source-ordered
//!    occurrences.
//! 2. Each top-level occurrence is rendered and swapped for an opaque
//!    `{{SHORTCODE_N}}` placeholder.
//! 3. The [`markdown`] subset renderer runs over the placeholder text.
//! 4. Placeholders are substituted back, and the shared
//!    [`activation_script`] is appended once when widgets were rendered.
//!
//! Malformed shortcodes fail open: they stay in the output as literal text.
//!
//! # Example
//!
//! ```
//! use pollmark_renderer::render;
//!
//! let output = render("# Feedback\n\n[yesno-question question=\"Useful?\"]", "default").unwrap();
//!
//! assert!(output.html.starts_with("<h1>Feedback</h1>"));
//! assert!(output.html.contains("data-testid=\"yesno-question-q1\""));
//! assert!(output.needs_activation_script);
//! ```

mod error;
pub mod export;
mod islands;
pub mod markdown;
mod pipeline;
pub mod shortcode;
mod util;

pub use error::RenderError;
pub use pipeline::{Pipeline, RenderOptions, RenderOutput, render};
pub use shortcode::question::activation_script;
pub use util::escape_html;
