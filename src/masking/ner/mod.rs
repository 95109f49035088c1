//! Named-entity recognition backends
//!
//! A recognizer labels spans of text with semantic categories. The
//! [`crate::masking::detector::ner::NameDetector`] sits on top of any
//! [`EntityRecognizer`] and keeps only person names, so the model backend
//! can be swapped without touching detection or masking.

pub mod gazetteer;

use crate::masking::models::Span;
use serde::{Deserialize, Serialize};

pub use gazetteer::{FeatureWeights, GazetteerModel, ModelArtifact};

/// Semantic category assigned by a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// People, including fictional
    Person,
    /// Companies, agencies, institutions
    Organization,
    /// Countries, cities, states
    Location,
}

impl EntityKind {
    /// Conventional NER label for the kind
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
            Self::Location => "GPE",
        }
    }
}

/// Span labelled by a recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub kind: EntityKind,
    /// Byte offsets into the text passed to [`EntityRecognizer::recognize`]
    pub span: Span,
    /// Text covered by `span`
    pub text: String,
    /// Model probability for `kind` (0.0 - 1.0)
    pub score: f32,
}

/// Trait for statistical NER model backends
///
/// Models are loaded once and shared read-only across requests.
pub trait EntityRecognizer: Send + Sync {
    /// Identifier of the loaded model (name and version)
    fn model_id(&self) -> String;

    /// Label every entity the model finds, in text order
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}
