//! Server configuration and startup.

use crate::routes::router;
use crate::state::AppState;
use std::env;
use std::net::SocketAddr;
use tracing::info;

const ENV_HOST: &str = "STUDENTS_API_HOST";
const ENV_PORT: &str = "STUDENTS_API_PORT";

/// Listen address configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Reads `STUDENTS_API_HOST` / `STUDENTS_API_PORT`, falling back to
    /// `0.0.0.0:5000`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = env::var(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = env::var(ENV_PORT).ok().and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        config
    }

    /// The address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The HTTP server.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    /// Creates a server with the given listen configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds the listener and serves until ctrl-c.
    ///
    /// # Errors
    /// Returns an error if binding fails or the server loop errors.
    pub async fn run(self, state: AppState) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr()).await?;
        let addr: SocketAddr = listener.local_addr()?;
        info!(%addr, "API server listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
