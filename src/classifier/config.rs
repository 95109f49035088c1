//! Classifier configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Trained model artifact (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// CSV dataset (`email`, `type` columns) used when the model is missing
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Train and save a model at startup when `model_path` does not exist
    #[serde(default = "default_train_if_missing")]
    pub train_if_missing: bool,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models/email_classifier.json")
}

fn default_train_if_missing() -> bool {
    true
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            dataset_path: None,
            train_if_missing: default_train_if_missing(),
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model_path.as_os_str().is_empty() {
            anyhow::bail!("classifier.model_path cannot be empty");
        }

        if let Some(ref path) = self.dataset_path {
            if path.extension().and_then(|s| s.to_str()) != Some("csv") {
                anyhow::bail!("Training dataset must be a CSV file: {}", path.display());
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("TRIAGE_CLASSIFIER_MODEL_PATH") {
            self.model_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("TRIAGE_CLASSIFIER_DATASET_PATH") {
            self.dataset_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var("TRIAGE_CLASSIFIER_TRAIN_IF_MISSING") {
            self.train_if_missing = val
                .parse()
                .context("Invalid TRIAGE_CLASSIFIER_TRAIN_IF_MISSING value")?;
        }

        Ok(())
    }
}
