//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the triage configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: {}:{}", config.server.host, config.server.port);
        println!(
            "  NER Model: {}",
            config
                .masking
                .ner_model_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "embedded".to_string())
        );
        println!(
            "  Masking Audit: {}",
            if config.masking.audit.enabled {
                config.masking.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  Classifier Model: {}",
            config.classifier.model_path.display()
        );
        if let Some(dataset) = &config.classifier.dataset_path {
            println!("  Training Dataset: {}", dataset.display());
        }
        println!("  Train If Missing: {}", config.classifier.train_if_missing);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();

        Ok(0)
    }
}
