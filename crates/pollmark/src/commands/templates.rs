//! `pollmark templates` command implementation.

use clap::Args;
use pollmark_renderer::shortcode::ShortcodeKind;

use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the templates command.
#[derive(Args)]
pub(crate) struct TemplatesArgs {
    /// Print only the template for this shortcode name.
    name: Option<String>,
}

impl TemplatesArgs {
    /// Execute the templates command.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a known shortcode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if let Some(name) = &self.name {
            let kind = ShortcodeKind::ALL
                .into_iter()
                .find(|kind| kind.name() == name.as_str())
                .ok_or_else(|| CliError::UnknownShortcode(name.clone()))?;
            write_stdout(kind.template())?;
            return Ok(());
        }

        for kind in ShortcodeKind::ALL {
            output.highlight(&format!("{} ({})", kind.display_name(), kind.name()));
            output.muted(kind.description());
            write_stdout(kind.template())?;
            output.info("");
        }
        Ok(())
    }
}
