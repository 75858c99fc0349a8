//! `pollmark serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use pollmark_config::{CliSettings, Config};
use pollmark_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover pollmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Response API base embedded in rendered widgets (overrides config).
    #[arg(long, env = "POLLMARK_API_BASE")]
    api_base: Option<String>,

    /// Enable verbose output (request and store logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Start with an empty store instead of the showcase document.
    #[arg(long)]
    no_seed: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            api_base: self.api_base,
            seed_default_document: self.no_seed.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.muted(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Response API: {}", config.render.api_base));
        if config.storage.seed_default_document {
            output.info("Showcase document: seeded");
        } else {
            output.info("Showcase document: disabled");
        }

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
