//! Mask command implementation
//!
//! Runs only the masking stage, so no classifier model is needed.

use super::read_input;
use crate::config::TriageConfig;
use crate::masking::{MaskedEmail, MaskingEngine};
use crate::service::{preprocess_email_text, MaskingOutcome};
use anyhow::Context;
use clap::Args;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Email text to mask (reads stdin when omitted)
    pub text: Option<String>,

    /// Mask the text exactly as given, skipping header stripping and whitespace collapsing
    #[arg(long)]
    pub raw: bool,

    /// Print the masked text only instead of JSON
    #[arg(long)]
    pub text_only: bool,
}

impl MaskArgs {
    /// Execute the mask command
    pub async fn execute(&self, config: &TriageConfig) -> anyhow::Result<i32> {
        let input = read_input(self.text.as_deref())?;
        let text = if self.raw {
            input
        } else {
            preprocess_email_text(&input)
        };

        let engine = match MaskingEngine::new(&config.masking) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ Failed to initialize masking: {e}");
                return Ok(2);
            }
        };

        let masked = engine.mask(&text)?;
        tracing::debug!(entities = masked.total_detections(), "Masking complete");

        println!("{}", self.render(&text, masked)?);
        Ok(0)
    }

    /// Format the result; entity positions are character offsets into `text`
    fn render(&self, text: &str, masked: MaskedEmail) -> anyhow::Result<String> {
        if self.text_only {
            return Ok(masked.masked_text);
        }
        let outcome = MaskingOutcome::new(text, masked);
        serde_json::to_string_pretty(&outcome).context("Failed to serialize result")
    }
}
