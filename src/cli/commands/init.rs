//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "email-triage.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing email triage configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point classifier.dataset_path at your labelled CSV");
                println!("  2. Train a model: email-triage train --dataset <csv>");
                println!("  3. Validate configuration: email-triage validate-config");
                println!("  4. Start the API: email-triage serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Email Triage Configuration

[application]
log_level = "info"

[server]
host = "0.0.0.0"
port = 8000

[classifier]
model_path = "./models/email_classifier.json"
# dataset_path = "./data/combined_emails_with_natural_pii.csv"
train_if_missing = true
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Email Triage Configuration
#
# Every value below is the default. Any ${VAR} reference is replaced with
# the environment variable of that name, and TRIAGE_<SECTION>_<KEY>
# variables override individual settings (PORT overrides server.port).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# HTTP Server
# ============================================================================
[server]
host = "0.0.0.0"
port = 8000

# ============================================================================
# PII Masking
# ============================================================================
[masking]
# Optional named-entity model (JSON). The embedded model is used when unset.
# ner_model_path = "./models/ner_model.json"

[masking.audit]
# Record every masking request with SHA-256 hashes of the detected values
enabled = false
log_path = "./audit/masking.log"
# JSON lines (true) or one plain-text line per request (false)
json_format = true

# ============================================================================
# Category Classifier
# ============================================================================
[classifier]
# Trained model artifact
model_path = "./models/email_classifier.json"

# CSV with `email` and `type` columns, used to train when the model is missing
# dataset_path = "${TRIAGE_DATASET}"

# Train and save a model at startup when model_path does not exist
train_if_missing = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to a rotating file in addition to the console
local_enabled = false
local_path = "./logs"
# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
