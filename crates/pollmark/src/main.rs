//! Pollmark CLI.
//!
//! Provides commands for:
//! - `serve`: Start the document and response API server
//! - `render`: Render a markdown file with shortcodes to HTML
//! - `shortcodes`: List the shortcodes found in a file
//! - `templates`: Show the insertable shortcode snippets

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ServeArgs, ShortcodesArgs, TemplatesArgs};
use error::CliError;
use output::Output;

/// Pollmark - interactive markdown documents.
#[derive(Parser)]
#[command(name = "pollmark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server.
    Serve(ServeArgs),
    /// Render a document to HTML.
    Render(RenderArgs),
    /// List shortcodes in a document.
    Shortcodes(ShortcodesArgs),
    /// Show shortcode templates.
    Templates(TemplatesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Render(args) => args.execute(),
        Commands::Shortcodes(args) => args.execute(),
        Commands::Templates(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
