//! Train command implementation
//!
//! Fits the classifier on an 80/20 split of a CSV dataset, prints the
//! held-out report and saves the model artifact.

use crate::classifier::dataset::load_dataset;
use crate::classifier::tfidf::TfidfParams;
use crate::classifier::EmailClassifier;
use crate::config::TriageConfig;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the train command
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV dataset with `email` and `type` columns
    #[arg(short, long)]
    pub dataset: String,

    /// Where to write the model (defaults to classifier.model_path)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum vocabulary size
    #[arg(long, default_value_t = 5000)]
    pub max_features: usize,

    /// Minimum number of documents a term must appear in
    #[arg(long, default_value_t = 2)]
    pub min_df: usize,

    /// Maximum fraction of documents a term may appear in
    #[arg(long, default_value_t = 0.85)]
    pub max_df: f64,
}

impl TrainArgs {
    /// Execute the train command
    pub async fn execute(&self, config: &TriageConfig) -> anyhow::Result<i32> {
        let output = self
            .output
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config.classifier.model_path.clone());

        println!("📚 Training classifier from {}", self.dataset);
        println!();

        let samples = match load_dataset(Path::new(&self.dataset)) {
            Ok(samples) => samples,
            Err(e) => {
                println!("❌ Failed to load dataset");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let params = TfidfParams {
            max_features: self.max_features,
            min_df: self.min_df,
            max_df: self.max_df,
        };
        let outcome = EmailClassifier::train(&samples, params)?;

        println!("{}", outcome.report);
        println!();

        outcome.classifier.save(&output)?;
        println!("✅ Model saved to {}", output.display());
        println!("   Categories: {}", outcome.classifier.labels().join(", "));

        Ok(0)
    }
}
