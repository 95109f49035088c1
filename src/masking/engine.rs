//! Main masking engine
//!
//! This module provides the [`MaskingEngine`] that orchestrates PII
//! detection, span reconciliation, masking and audit logging for a single
//! email body.
//!
//! # Architecture
//!
//! The engine coordinates three components:
//! - **Pattern detector**: the seven fixed regex rules
//! - **Name detector**: person names from the NER model
//! - **Audit logger**: records masking operations with hashed values
//!
//! Both detectors are injected and shared read-only, so one engine serves
//! any number of concurrent requests.
//!
//! # Examples
//!
//! ```no_run
//! use email_triage::masking::{config::MaskingConfig, MaskingEngine};
//!
//! # fn example() -> email_triage::domain::Result<()> {
//! let engine = MaskingEngine::new(&MaskingConfig::default())?;
//! let result = engine.mask("Contact me at jane.doe@example.com tomorrow.")?;
//! assert_eq!(result.masked_text, "Contact me at [email] tomorrow.");
//! # Ok(())
//! # }
//! ```

use crate::domain::{MaskingError, Result, TriageError};
use crate::masking::{
    audit::AuditLogger,
    config::MaskingConfig,
    detector::{ner::NameDetector, regex::RegexDetector, PiiDetector},
    masker,
    models::{MaskedEmail, PiiEntity},
};
use std::sync::Arc;
use std::time::Instant;

/// Which label set a detector is allowed to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelSource {
    Pattern,
    Name,
}

/// Main masking engine
///
/// # Thread Safety
///
/// The engine is `Send + Sync` and is shared across requests behind `Arc`.
/// Detection and masking hold no locks; only audit appends are serialised.
pub struct MaskingEngine {
    pattern_detector: Arc<dyn PiiDetector>,
    name_detector: Arc<dyn PiiDetector>,
    audit_logger: Option<AuditLogger>,
}

impl MaskingEngine {
    /// Create an engine with the built-in detectors
    ///
    /// Loads the NER model once (configured path or embedded artifact).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The regex patterns or the NER model cannot be loaded
    /// - The audit log directory cannot be created
    pub fn new(config: &MaskingConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TriageError::Configuration(format!("{e:#}")))?;

        let pattern_detector = RegexDetector::new()
            .map_err(|e| TriageError::ModelLoad(format!("Failed to compile PII patterns: {e:#}")))?;

        let name_detector = NameDetector::load(config.ner_model_path.as_deref())
            .map_err(|e| TriageError::ModelLoad(format!("{e:#}")))?;

        let audit_logger = if config.audit.enabled {
            let logger = AuditLogger::new(config.audit.log_path.clone(), config.audit.json_format)
                .map_err(|e| TriageError::Configuration(format!("{e:#}")))?;
            Some(logger)
        } else {
            None
        };

        Ok(Self::with_detectors(
            Arc::new(pattern_detector),
            Arc::new(name_detector),
            audit_logger,
        ))
    }

    /// Create an engine over already constructed detectors
    pub fn with_detectors(
        pattern_detector: Arc<dyn PiiDetector>,
        name_detector: Arc<dyn PiiDetector>,
        audit_logger: Option<AuditLogger>,
    ) -> Self {
        Self {
            pattern_detector,
            name_detector,
            audit_logger,
        }
    }

    /// Detect and mask PII in `text`
    ///
    /// Returns the masked text and every detected entity sorted by start,
    /// with offsets into `text`.
    ///
    /// # Errors
    ///
    /// Fails the whole request, with no partial result, if a detector errors
    /// or returns a span that does not index `text`.
    pub fn mask(&self, text: &str) -> Result<MaskedEmail> {
        let start = Instant::now();

        let pattern_entities =
            self.run_detector(&self.pattern_detector, text, LabelSource::Pattern)?;
        let name_entities = self.run_detector(&self.name_detector, text, LabelSource::Name)?;

        tracing::debug!(
            pattern_entities = pattern_entities.len(),
            name_entities = name_entities.len(),
            "PII detection complete"
        );

        let result = masker::mask_entities(text, pattern_entities, name_entities);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if let Some(ref logger) = self.audit_logger {
            let request_id = logger
                .log_masking(text, &result, elapsed_ms)
                .map_err(|e| TriageError::Io(format!("{e:#}")))?;
            tracing::debug!(%request_id, "Masking audited");
        }

        tracing::info!(
            detections = result.total_detections(),
            text_length = text.len(),
            duration_ms = elapsed_ms,
            "Email masked"
        );

        Ok(result)
    }

    /// Whether masking operations are written to the audit log
    pub fn is_audited(&self) -> bool {
        self.audit_logger.is_some()
    }

    fn run_detector(
        &self,
        detector: &Arc<dyn PiiDetector>,
        text: &str,
        source: LabelSource,
    ) -> Result<Vec<PiiEntity>> {
        let entities = detector
            .detect(text)
            .map_err(|e| MaskingError::DetectorFailed {
                detector: detector.name().to_string(),
                message: format!("{e:#}"),
            })?;

        for entity in &entities {
            check_entity(detector.name(), text, entity, source)?;
        }

        Ok(entities)
    }
}

/// Reject entities that break the detector contract
fn check_entity(
    detector: &str,
    text: &str,
    entity: &PiiEntity,
    source: LabelSource,
) -> std::result::Result<(), MaskingError> {
    let span = entity.position;
    if !span.fits(text) {
        return Err(MaskingError::InvalidSpan {
            detector: detector.to_string(),
            start: span.start,
            end: span.end,
            len: text.len(),
        });
    }

    if !entity.matches_source(text) {
        return Err(MaskingError::EntityMismatch {
            detector: detector.to_string(),
            start: span.start,
            end: span.end,
        });
    }

    let owns_label = match source {
        LabelSource::Pattern => entity.classification.is_pattern_label(),
        LabelSource::Name => !entity.classification.is_pattern_label(),
    };
    if !owns_label {
        return Err(MaskingError::UnexpectedLabel {
            detector: detector.to_string(),
            label: entity.classification.to_string(),
        });
    }

    Ok(())
}

impl std::fmt::Debug for MaskingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskingEngine")
            .field("pattern_detector", &self.pattern_detector.name())
            .field("name_detector", &self.name_detector.name())
            .field("audit", &self.audit_logger)
            .finish()
    }
}
