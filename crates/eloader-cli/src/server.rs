//! Static-file dev server that reports its lifecycle to a dev session.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use eloader_core::ServerEvent;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::error::{CliError, Result};

/// Development HTTP server.
#[derive(Debug, Clone)]
pub struct DevServer {
    addr: SocketAddr,
    serve_dir: PathBuf,
}

impl DevServer {
    pub fn new(addr: SocketAddr, serve_dir: PathBuf) -> Self {
        Self { addr, serve_dir }
    }

    fn router(&self) -> Router {
        Router::new()
            .fallback_service(ServeDir::new(&self.serve_dir))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
    }

    /// Bind, serve until `shutdown` resolves, then shut down gracefully.
    ///
    /// Sends [`ServerEvent::Listening`] with the bound address once the
    /// socket is open and [`ServerEvent::Closed`] after shutdown. If binding
    /// fails neither event is sent and `events` is dropped.
    pub async fn run<F>(self, events: mpsc::Sender<ServerEvent>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", self.addr, e)))?;
        let local_addr = listener.local_addr()?;

        tracing::debug!(
            "Serving {} on {}",
            self.serve_dir.display(),
            local_addr
        );
        // A closed receiver means the session already ended
        let _ = events.send(ServerEvent::Listening(local_addr)).await;

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))?;

        let _ = events.send(ServerEvent::Closed).await;
        Ok(())
    }
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed it never
/// resolves.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => crate::ui::info("Shutting down dev server..."),
        Err(e) => {
            tracing::warn!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await
        }
    }
}
