//! Classify command implementation

use super::read_input;
use crate::config::TriageConfig;
use crate::service::TriageService;
use anyhow::Context;
use clap::Args;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Email body to classify (reads stdin when omitted)
    pub text: Option<String>,
}

impl ClassifyArgs {
    /// Execute the classify command
    ///
    /// Prints the same JSON document the HTTP API returns.
    pub async fn execute(&self, config: &TriageConfig) -> anyhow::Result<i32> {
        let email_body = read_input(self.text.as_deref())?;

        let service = match TriageService::from_config(&config.masking, &config.classifier) {
            Ok(service) => service,
            Err(e) => {
                eprintln!("❌ Failed to load models: {e}");
                return Ok(2);
            }
        };

        let outcome = service.process(&email_body)?;
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize result")?;
        println!("{json}");

        Ok(0)
    }
}
