//! Support-email category classification
//!
//! TF-IDF features over normalised tokens, scored against per-category
//! centroids. The model is trained offline (or once at startup) and is
//! read-only afterwards.

pub mod config;
pub mod dataset;
pub mod metrics;
pub mod model;
pub mod preprocess;
pub mod tfidf;

use crate::domain::Result;

pub use metrics::{ClassificationReport, LabelMetrics};
pub use model::{EmailClassifier, TrainingOutcome};

/// Trait for category classifiers
///
/// Takes already-masked text; implementations never see raw PII.
pub trait CategoryClassifier: Send + Sync {
    /// Predict the category label of `masked_text`
    fn classify(&self, masked_text: &str) -> Result<String>;

    /// Every label the classifier can return
    fn labels(&self) -> Vec<String>;
}
