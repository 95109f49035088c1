//! Named-entity PII detector
//!
//! Wraps an [`EntityRecognizer`] and keeps only person names. Dates,
//! numbers and contact details are the pattern detector's job, so every
//! other category the model produces is dropped here.

use super::PiiDetector;
use crate::masking::models::{DetectionMethod, PiiEntity, PiiLabel};
use crate::masking::ner::{EntityKind, EntityRecognizer, GazetteerModel};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Person-name detector backed by a shared NER model
#[derive(Clone)]
pub struct NameDetector {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl NameDetector {
    /// Create a detector over an already loaded model
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Load the NER model once: from `model_path` if given, else the embedded model
    pub fn load(model_path: Option<&Path>) -> Result<Self> {
        let model = match model_path {
            Some(path) => GazetteerModel::from_file(path)?,
            None => GazetteerModel::embedded()?,
        };
        tracing::info!(model = %model.model_id(), "NER model loaded");
        Ok(Self::new(Arc::new(model)))
    }

    /// Identifier of the underlying model
    pub fn model_id(&self) -> String {
        self.recognizer.model_id()
    }
}

impl PiiDetector for NameDetector {
    fn name(&self) -> &'static str {
        "ner"
    }

    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>> {
        let names = self
            .recognizer
            .recognize(text)
            .into_iter()
            .filter(|e| e.kind == EntityKind::Person)
            .map(|e| {
                PiiEntity {
                    position: e.span,
                    classification: PiiLabel::FullName,
                    entity: e.text,
                    detection_method: DetectionMethod::Ner,
                    confidence: 1.0,
                }
                .with_confidence(e.score)
            })
            .collect();

        Ok(names)
    }
}

impl std::fmt::Debug for NameDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameDetector")
            .field("model", &self.recognizer.model_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::models::Span;
    use crate::masking::ner::RecognizedEntity;

    struct FixedRecognizer(Vec<RecognizedEntity>);

    impl EntityRecognizer for FixedRecognizer {
        fn model_id(&self) -> String {
            "fixed@0".to_string()
        }

        fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
            self.0.clone()
        }
    }

    fn recognized(kind: EntityKind, text: &str, start: usize, end: usize) -> RecognizedEntity {
        RecognizedEntity {
            kind,
            span: Span::new(start, end),
            text: text[start..end].to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn test_keeps_only_person_entities() {
        let text = "Ravi Kumar from Acme Corp in Pune";
        let detector = NameDetector::new(Arc::new(FixedRecognizer(vec![
            recognized(EntityKind::Person, text, 0, 10),
            recognized(EntityKind::Organization, text, 16, 25),
            recognized(EntityKind::Location, text, 29, 33),
        ])));

        let entities = detector.detect(text).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].classification, PiiLabel::FullName);
        assert_eq!(entities[0].entity, "Ravi Kumar");
        assert_eq!(entities[0].detection_method, DetectionMethod::Ner);
        assert!((entities[0].confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_embedded_model() {
        let detector = NameDetector::load(None).unwrap();
        let entities = detector.detect("John Smith's email is john@x.com").unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].position, Span::new(0, 10));
        assert_eq!(entities[0].entity, "John Smith");
    }

    #[test]
    fn test_load_missing_model_fails_fast() {
        let result = NameDetector::load(Some(Path::new("/nonexistent/ner.json")));
        assert!(result.is_err());
    }
}
