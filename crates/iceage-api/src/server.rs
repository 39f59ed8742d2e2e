//! HTTP server lifecycle.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use iceage_core::IceageConfig;

use crate::Result;
use crate::routes::router;
use crate::state::{AppState, SharedState};

/// ICE-AGE dashboard server
#[derive(Debug, Clone)]
pub struct Server {
    state: SharedState,
}

impl Server {
    /// Create a server for a resolved configuration.
    pub fn new(config: IceageConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Address from the `[server]` section.
    pub fn address(&self) -> String {
        let server = &self.state.config.server;
        format!("{}:{}", server.host, server.port)
    }

    /// The router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.address()).await?;
        let local: SocketAddr = listener.local_addr()?;
        let catalog = self.state.config.catalog.root.display().to_string();
        tracing::info!(%local, %catalog, "ICE-AGE dashboard listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_config() {
        let mut config = IceageConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 9000;
        assert_eq!(Server::new(config).address(), "0.0.0.0:9000");
    }
}
