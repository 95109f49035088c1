//! Email triage pipeline: preprocess, mask, classify

use super::preprocess::preprocess_email_text;
use super::response::ClassificationOutcome;
use crate::classifier::{config::ClassifierConfig, CategoryClassifier, EmailClassifier};
use crate::domain::Result;
use crate::masking::{config::MaskingConfig, MaskedEmail, MaskingEngine};
use std::sync::Arc;
use std::time::Instant;

/// Shared, read-only triage pipeline
///
/// Cloning is cheap; every clone shares the same loaded models.
#[derive(Clone)]
pub struct TriageService {
    masking: Arc<MaskingEngine>,
    classifier: Arc<dyn CategoryClassifier>,
}

impl TriageService {
    /// Create a service over already loaded components
    pub fn new(masking: Arc<MaskingEngine>, classifier: Arc<dyn CategoryClassifier>) -> Self {
        Self {
            masking,
            classifier,
        }
    }

    /// Load every model named by the configuration
    ///
    /// Trains the classifier first when its artifact is missing and a
    /// dataset is configured.
    pub fn from_config(masking: &MaskingConfig, classifier: &ClassifierConfig) -> Result<Self> {
        let engine = MaskingEngine::new(masking)?;
        let model = EmailClassifier::load_or_train(classifier)?;

        tracing::info!(
            categories = ?model.labels(),
            audit = engine.is_audited(),
            "Triage service ready"
        );

        Ok(Self::new(Arc::new(engine), Arc::new(model)))
    }

    /// Preprocess and mask an email body
    ///
    /// Returns the preprocessed text the spans index, and the masking result.
    pub fn mask(&self, email_body: &str) -> Result<(String, MaskedEmail)> {
        let text = preprocess_email_text(email_body);
        let masked = self.masking.mask(&text)?;
        Ok((text, masked))
    }

    /// Run the full pipeline on one email body
    pub fn process(&self, email_body: &str) -> Result<ClassificationOutcome> {
        let start = Instant::now();

        let (text, masked) = self.mask(email_body)?;
        let category = self.classifier.classify(&masked.masked_text)?;

        tracing::info!(
            category = %category,
            entities = masked.total_detections(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Email classified"
        );

        Ok(ClassificationOutcome::new(
            email_body.to_string(),
            &text,
            masked,
            category,
        ))
    }

    /// Category labels the classifier can return
    pub fn categories(&self) -> Vec<String> {
        self.classifier.labels()
    }
}

impl std::fmt::Debug for TriageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageService")
            .field("masking", &self.masking)
            .field("categories", &self.classifier.labels())
            .finish()
    }
}
