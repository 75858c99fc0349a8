//! CLI error types.

use pollmark_config::ConfigError;
use pollmark_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Server(String),

    #[error("unknown shortcode: {0}")]
    UnknownShortcode(String),

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },
}
