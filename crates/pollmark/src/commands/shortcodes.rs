//! `pollmark shortcodes` command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use pollmark_renderer::shortcode::{OutlineEntry, count_shortcodes, outline};

use super::read_document;
use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the shortcodes command.
#[derive(Args)]
pub(crate) struct ShortcodesArgs {
    /// Path to the markdown file.
    file: PathBuf,
}

impl ShortcodesArgs {
    /// Execute the shortcodes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let content = read_document(&self.file)?;

        let entries = outline(&content);
        let counts = count_shortcodes(&content);

        if !entries.is_empty() {
            write_stdout(&format_outline(&entries))?;
        }
        output.highlight(&format!(
            "{} question(s), {} section(s)",
            counts.questions, counts.sections
        ));
        Ok(())
    }
}

/// One line per entry: `line  kind  [id]  label`.
fn format_outline(entries: &[OutlineEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let id = entry
            .question_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>4}  {:<18}  {:<4}  {}",
            entry.line,
            entry.kind.name(),
            id,
            entry.label
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_outline() {
        let text = "[interactivesection]\n## Intro\n[/interactivesection]\n\n[yesno-question question=\"Ready?\"]";

        let formatted = format_outline(&outline(text));

        assert_eq!(
            formatted,
            "   1  interactivesection        Intro\n   5  yesno-question      q1    Ready?\n"
        );
    }

    #[test]
    fn test_format_outline_empty() {
        assert_eq!(format_outline(&[]), "");
    }
}
