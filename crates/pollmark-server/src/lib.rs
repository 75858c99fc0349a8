//! HTTP server for Pollmark.
//!
//! Serves a JSON API over axum:
//! - document CRUD backed by a [`DocumentStore`](pollmark_store::DocumentStore)
//! - yes/no response recording and tallies used by rendered widgets
//! - server-side rendering, live preview and HTML/MDX export
//!
//! # Quick Start
//!
//! ```ignore
//! use pollmark_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (pollmark-server)
//!                        │
//!                        ├─► /api/documents ──► DocumentStore
//!                        ├─► /api/responses ──► ResponseStore
//!                        └─► /api/render, export ──► Pipeline (pollmark-renderer)
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use pollmark_renderer::RenderOptions;
use pollmark_store::MemoryStore;

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Options used for every render.
    pub render: RenderOptions,
    /// Seed the store with the showcase document.
    pub seed_default_document: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            render: RenderOptions::default(),
            seed_default_document: true,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::with_seed(config.seed_default_document));
    tracing::info!(
        documents = store.document_count(),
        seeded = config.seed_default_document,
        "Initialized in-memory store"
    );

    let state = Arc::new(AppState::new(store, config.render.clone()));
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, api_base = %config.render.api_base, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded Pollmark config.
#[must_use]
pub fn server_config_from_config(config: &pollmark_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        render: RenderOptions::default()
            .with_api_base(config.render.api_base.clone())
            .with_activation_script(config.render.embed_activation_script)
            .with_escaped_labels(config.render.escape_labels),
        seed_default_document: config.storage.seed_default_document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = pollmark_config::Config::default();
        config.server.port = 8080;
        config.render.api_base = "/poll/api".to_owned();
        config.render.escape_labels = true;
        config.storage.seed_default_document = false;

        let server = server_config_from_config(&config);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.render.api_base, "/poll/api");
        assert!(server.render.embed_activation_script);
        assert!(server.render.escape_labels);
        assert!(!server.seed_default_document);
    }
}
