//! Nearest-centroid email classifier over TF-IDF vectors

use super::config::ClassifierConfig;
use super::dataset::{self, LabeledEmail, SPLIT_SEED, TEST_FRACTION};
use super::metrics::ClassificationReport;
use super::preprocess::tokenize;
use super::tfidf::{TfidfParams, TfidfVectorizer};
use super::CategoryClassifier;
use crate::domain::{Result, TriageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Artifact format version written by [`EmailClassifier::save`]
pub const ARTIFACT_VERSION: u32 = 1;

/// Unit-length mean vector of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Centroid {
    label: String,
    weights: Vec<f32>,
}

/// Trained email category classifier
///
/// Prediction is cosine similarity against per-category centroids. Ties go
/// to the lexicographically smallest label; text with no known terms gets
/// the majority training label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailClassifier {
    version: u32,
    trained_at: DateTime<Utc>,
    vectorizer: TfidfVectorizer,
    /// Sorted by label
    centroids: Vec<Centroid>,
    majority_label: String,
}

/// Outcome of [`EmailClassifier::train`]
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub classifier: EmailClassifier,
    pub report: ClassificationReport,
}

impl EmailClassifier {
    /// Fit on every sample, without a held-out split
    pub fn fit(samples: &[LabeledEmail], params: TfidfParams) -> Result<Self> {
        if samples.is_empty() {
            return Err(TriageError::Classification(
                "Cannot train on an empty dataset".to_string(),
            ));
        }

        let documents: Vec<Vec<String>> = samples.iter().map(|s| tokenize(&s.text)).collect();
        let vectorizer = TfidfVectorizer::fit(&documents, params)?;
        let dims = vectorizer.vocabulary_size();

        let mut sums: BTreeMap<&str, (Vec<f32>, usize)> = BTreeMap::new();
        for (sample, tokens) in samples.iter().zip(&documents) {
            let vector = vectorizer.transform(tokens);
            let (sum, count) = sums
                .entry(sample.category.as_str())
                .or_insert_with(|| (vec![0.0; dims], 0));
            for &(i, w) in vector.entries() {
                sum[i] += w;
            }
            *count += 1;
        }

        // BTreeMap order keeps the smallest label first among equal counts
        let majority_label = sums
            .iter()
            .fold(None::<(&str, usize)>, |best, (&label, &(_, count))| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((label, count)),
            })
            .map(|(label, _)| label.to_string())
            .unwrap_or_default();

        let centroids = sums
            .into_iter()
            .map(|(label, (mut weights, _))| {
                let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    weights.iter_mut().for_each(|w| *w /= norm);
                }
                Centroid {
                    label: label.to_string(),
                    weights,
                }
            })
            .collect();

        Ok(Self {
            version: ARTIFACT_VERSION,
            trained_at: Utc::now(),
            vectorizer,
            centroids,
            majority_label,
        })
    }

    /// Shuffle-split the samples 80/20, fit on the train part and evaluate on the rest
    pub fn train(samples: &[LabeledEmail], params: TfidfParams) -> Result<TrainingOutcome> {
        let (train, test) = dataset::train_test_split(samples, TEST_FRACTION, SPLIT_SEED)?;
        let classifier = Self::fit(&train, params)?;

        let truth: Vec<String> = test.iter().map(|s| s.category.clone()).collect();
        let predicted: Vec<String> = test
            .iter()
            .map(|s| classifier.predict_label(&s.text))
            .collect();
        let report = ClassificationReport::evaluate(&truth, &predicted);

        tracing::info!(
            train_samples = train.len(),
            test_samples = report.test_samples,
            accuracy = report.accuracy,
            vocabulary = classifier.vectorizer.vocabulary_size(),
            "Classifier trained"
        );

        Ok(TrainingOutcome { classifier, report })
    }

    /// Predict the category of a (masked) email body
    pub fn predict_label(&self, text: &str) -> String {
        let vector = self.vectorizer.transform(&tokenize(text));
        if vector.is_empty() {
            return self.majority_label.clone();
        }

        let mut best: Option<(&str, f32)> = None;
        for centroid in &self.centroids {
            let score = vector.dot(&centroid.weights);
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((centroid.label.as_str(), score)),
            }
        }

        best.map(|(label, _)| label.to_string())
            .unwrap_or_else(|| self.majority_label.clone())
    }

    /// Labels seen during training, sorted
    pub fn labels(&self) -> Vec<String> {
        self.centroids.iter().map(|c| c.label.clone()).collect()
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Write the model as JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;

        tracing::info!(path = %path.display(), "Classifier model saved");
        Ok(())
    }

    /// Read a model written by [`EmailClassifier::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TriageError::ModelLoad(format!(
                "Failed to read classifier model {}: {e}",
                path.display()
            ))
        })?;
        let model: Self = serde_json::from_str(&content).map_err(|e| {
            TriageError::ModelLoad(format!(
                "Failed to parse classifier model {}: {e}",
                path.display()
            ))
        })?;

        if model.version != ARTIFACT_VERSION {
            return Err(TriageError::ModelLoad(format!(
                "Unsupported classifier model version {} (expected {ARTIFACT_VERSION})",
                model.version
            )));
        }
        if model.centroids.is_empty() {
            return Err(TriageError::ModelLoad(
                "Classifier model has no categories".to_string(),
            ));
        }
        model.vectorizer.check_consistency().map_err(|e| {
            TriageError::ModelLoad(format!("Corrupt classifier model {}: {e}", path.display()))
        })?;
        let dims = model.vectorizer.vocabulary_size();
        if let Some(centroid) = model.centroids.iter().find(|c| c.weights.len() != dims) {
            return Err(TriageError::ModelLoad(format!(
                "Corrupt classifier model {}: centroid '{}' has {} weights, expected {dims}",
                path.display(),
                centroid.label,
                centroid.weights.len()
            )));
        }

        tracing::info!(
            path = %path.display(),
            categories = model.centroids.len(),
            trained_at = %model.trained_at,
            "Classifier model loaded"
        );
        Ok(model)
    }

    /// Load the configured model, training and saving it first if it is absent
    pub fn load_or_train(config: &ClassifierConfig) -> Result<Self> {
        if config.model_path.exists() {
            return Self::load(&config.model_path);
        }

        let dataset_path = match (&config.dataset_path, config.train_if_missing) {
            (Some(path), true) => path,
            _ => {
                return Err(TriageError::ModelLoad(format!(
                    "Classifier model not found at {} and no training dataset configured",
                    config.model_path.display()
                )))
            }
        };

        tracing::warn!(
            model_path = %config.model_path.display(),
            dataset = %dataset_path.display(),
            "Classifier model missing, training from dataset"
        );

        let samples = dataset::load_dataset(dataset_path)?;
        let outcome = Self::train(&samples, TfidfParams::default())?;
        outcome.classifier.save(&config.model_path)?;

        Ok(outcome.classifier)
    }
}

impl CategoryClassifier for EmailClassifier {
    fn classify(&self, masked_text: &str) -> Result<String> {
        Ok(self.predict_label(masked_text))
    }

    fn labels(&self) -> Vec<String> {
        EmailClassifier::labels(self)
    }
}
