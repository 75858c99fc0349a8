//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod serve;
pub(crate) mod shortcodes;
pub(crate) mod templates;

pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use shortcodes::ShortcodesArgs;
pub(crate) use templates::TemplatesArgs;

use std::path::Path;

use crate::error::CliError;

/// Read a document from disk.
pub(crate) fn read_document(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.display().to_string(),
        source,
    })
}
