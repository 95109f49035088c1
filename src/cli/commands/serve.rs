//! Serve command implementation
//!
//! Loads both models once and runs the HTTP API until shutdown.

use crate::config::TriageConfig;
use crate::server;
use crate::service::TriageService;
use clap::Args;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind host from the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port from the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config: &TriageConfig) -> anyhow::Result<i32> {
        let mut server_config = config.server.clone();
        if let Some(host) = &self.host {
            server_config.host = host.clone();
        }
        if let Some(port) = self.port {
            server_config.port = port;
        }

        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            model_path = %config.classifier.model_path.display(),
            "Starting triage server"
        );

        let masking = config.masking.clone();
        let classifier = config.classifier.clone();
        let service = match tokio::task::spawn_blocking(move || {
            TriageService::from_config(&masking, &classifier)
        })
        .await?
        {
            Ok(service) => service,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load triage models");
                eprintln!("❌ Failed to load models: {e}");
                return Ok(2);
            }
        };

        server::serve(&server_config, service).await?;
        Ok(0)
    }
}
