//! Regex-based PII detector

use super::{patterns::PatternRegistry, PiiDetector};
use crate::masking::models::{DetectionMethod, PiiEntity};
use anyhow::Result;
use std::sync::Arc;

/// Regex-based PII detector
///
/// Output is in discovery order: pattern iteration order first, then
/// left to right within a pattern. Nothing is sorted or deduplicated here.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl RegexDetector {
    /// Create a new regex detector with the built-in patterns
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::new()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new regex detector with an already compiled registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    fn detect_in_string(&self, text: &str) -> Vec<PiiEntity> {
        let mut entities = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            for matched in pattern.regex.find_iter(text) {
                // regex match bounds are always valid slice bounds
                if let Some(entity) = PiiEntity::from_text(
                    pattern.label,
                    text,
                    matched.start(),
                    matched.end(),
                    DetectionMethod::Regex,
                ) {
                    entities.push(entity);
                }
            }
        }

        entities
    }
}

impl PiiDetector for RegexDetector {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>> {
        Ok(self.detect_in_string(text))
    }
}
