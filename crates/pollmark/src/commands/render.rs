//! `pollmark render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use pollmark_config::Config;
use pollmark_renderer::export::standalone_document;
use pollmark_renderer::{Pipeline, RenderOptions};

use super::read_document;
use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Document id embedded in question widgets.
    #[arg(long, default_value = "default")]
    document_id: String,

    /// Wrap the output in a complete HTML page.
    #[arg(long)]
    standalone: bool,

    /// Page title for standalone output (default: file name).
    #[arg(long, requires = "standalone")]
    title: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover pollmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the document id is
    /// invalid, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let content = read_document(&self.file)?;
        let options = render_options(&config, self.standalone);
        let rendered = Pipeline::new(options).render(&content, &self.document_id)?;

        let html = if self.standalone {
            let title = self
                .title
                .unwrap_or_else(|| default_title(&self.file));
            standalone_document(&title, &rendered.html)
        } else {
            rendered.html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => write_stdout(&html)?,
        }

        tracing::info!(
            file = %self.file.display(),
            document_id = %self.document_id,
            "Rendered document"
        );
        Ok(())
    }
}

/// Render options from config. Standalone pages always carry the script.
fn render_options(config: &Config, standalone: bool) -> RenderOptions {
    RenderOptions::default()
        .with_api_base(config.render.api_base.clone())
        .with_activation_script(standalone || config.render.embed_activation_script)
        .with_escaped_labels(config.render.escape_labels)
}

/// Page title derived from the file name.
fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
