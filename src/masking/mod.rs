//! PII/PCI detection and masking
//!
//! Two detectors feed one masker:
//!
//! - [`detector::regex::RegexDetector`] finds the seven pattern labels
//! - [`detector::ner::NameDetector`] finds person names with a NER model
//! - [`masker`] reconciles both outputs and rewrites the text right to left
//!
//! [`MaskingEngine`] wires them together, validates detector output and
//! writes the optional audit trail.

pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod masker;
pub mod models;
pub mod ner;

pub use engine::MaskingEngine;
pub use models::{DetectionMethod, MaskedEmail, PiiEntity, PiiLabel, Span};
