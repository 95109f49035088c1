//! PII detection module
//!
//! Provides the trait-based detection interface and its two implementations:
//! the fixed-pattern [`regex::RegexDetector`] and the model-backed
//! [`ner::NameDetector`].

pub mod ner;
pub mod patterns;
pub mod regex;

use crate::masking::models::PiiEntity;
use anyhow::Result;

/// Trait for PII detection implementations
///
/// Implementations must return spans that are valid slices of `text`
/// (`start <= end <= text.len()`, both on character boundaries) whose
/// `entity` equals the sliced text. The masking engine rejects the request
/// when a detector breaks this contract.
pub trait PiiDetector: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Detect PII in a text
    fn detect(&self, text: &str) -> Result<Vec<PiiEntity>>;
}
