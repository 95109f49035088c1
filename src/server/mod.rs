//! HTTP server for the triage API

pub mod routes;

use crate::config::ServerConfig;
use crate::service::TriageService;
use anyhow::{Context, Result};
use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;

pub use routes::{router, AppState};

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &ServerConfig, service: TriageService) -> Result<()> {
    let app = router(AppState { service });

    let listener = bind(config).await?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Bind the configured host and port; hostnames are resolved
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))
}

async fn shutdown_signal() {
    let ctrl_c = park_on_error("Ctrl-C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = park_on_error("SIGTERM", async {
        signal::unix::signal(signal::unix::SignalKind::terminate())?
            .recv()
            .await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Await a signal; if its handler cannot be installed, never complete
async fn park_on_error<F>(name: &str, wait: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = wait.await {
        tracing::error!(error = %e, signal = name, "Failed to install signal handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn server_config(host: &str) -> ServerConfig {
        ServerConfig {
            host: host.to_string(),
            port: 0,
        }
    }

    #[tokio::test]
    async fn test_failed_handler_does_not_trigger_shutdown() {
        let failing = park_on_error("test", async {
            Err::<(), _>(std::io::Error::other("no signal support"))
        });
        let waited = tokio::time::timeout(Duration::from_millis(50), failing).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_delivered_signal_completes() {
        let delivered = park_on_error("test", async { Ok::<(), std::io::Error>(()) });
        let waited = tokio::time::timeout(Duration::from_millis(50), delivered).await;
        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn test_bind_resolves_hostname() {
        let listener = bind(&server_config("localhost")).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_ip_literal() {
        let listener = bind(&server_config("127.0.0.1")).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_rejects_malformed_host() {
        assert!(bind(&server_config("bad host name")).await.is_err());
    }
}
