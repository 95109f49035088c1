//! Edge case tests for the masking engine

use email_triage::domain::{MaskingError, TriageError};
use email_triage::masking::detector::ner::NameDetector;
use email_triage::masking::detector::regex::RegexDetector;
use email_triage::masking::detector::PiiDetector;
use email_triage::masking::masker::{mask_entities, rewrite_right_to_left};
use email_triage::masking::{DetectionMethod, MaskingEngine, PiiEntity, PiiLabel, Span};
use std::sync::Arc;

/// Detector that returns a fixed set of entities regardless of input
struct FixedDetector(Vec<PiiEntity>);

impl PiiDetector for FixedDetector {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn detect(&self, _text: &str) -> anyhow::Result<Vec<PiiEntity>> {
        Ok(self.0.clone())
    }
}

fn entity(label: PiiLabel, text: &str, start: usize, end: usize) -> PiiEntity {
    let method = if label == PiiLabel::FullName {
        DetectionMethod::Ner
    } else {
        DetectionMethod::Regex
    };
    PiiEntity::from_text(label, text, start, end, method).expect("valid span")
}

fn default_name_detector() -> Arc<dyn PiiDetector> {
    Arc::new(NameDetector::load(None).expect("embedded model"))
}

#[test]
fn test_overlapping_patterns_are_both_reported() {
    // The expiry pattern also matches the month/year tail of a birth date
    let engine = MaskingEngine::new(&Default::default()).unwrap();
    let masked = engine.mask("My DOB is 15/08/1990.").unwrap();

    let found: Vec<(PiiLabel, usize, usize)> = masked
        .entities
        .iter()
        .map(|e| (e.classification, e.position.start, e.position.end))
        .collect();
    assert_eq!(
        found,
        vec![(PiiLabel::Dob, 10, 20), (PiiLabel::ExpiryNo, 13, 20)]
    );
    assert_eq!(masked.masked_text, "My DOB is [dob]_no].");
}

#[test]
fn test_right_to_left_keeps_offsets_valid() {
    let text = "a@b.io and 987-654-3210";
    let entities = vec![
        entity(PiiLabel::Email, text, 0, 6),
        entity(PiiLabel::PhoneNumber, text, 11, 23),
    ];

    assert_eq!(
        rewrite_right_to_left(text, &entities),
        "[email] and [phone_number]"
    );
}

#[test]
fn test_pattern_and_name_entities_are_unioned() {
    let text = "Emily Davis emily@example.com";
    let patterns = vec![entity(PiiLabel::Email, text, 12, 29)];
    let names = vec![entity(PiiLabel::FullName, text, 0, 11)];

    let masked = mask_entities(text, patterns, names);
    assert_eq!(masked.masked_text, "[full_name] [email]");
    assert_eq!(masked.entities[0].classification, PiiLabel::FullName);
    assert_eq!(masked.entities[1].classification, PiiLabel::Email);
}

#[test]
fn test_multibyte_text_masks_on_char_boundaries() {
    let engine = MaskingEngine::new(&Default::default()).unwrap();
    let text = "Café order for jane@example.com, danke schön";
    let masked = engine.mask(text).unwrap();

    assert_eq!(masked.total_detections(), 1);
    let email = &masked.entities[0];
    assert_eq!(email.position, Span::new(16, 32));
    assert_eq!(&text[16..32], "jane@example.com");
    assert_eq!(masked.masked_text, "Café order for [email], danke schön");
}

#[test]
fn test_whitespace_only_text() {
    let engine = MaskingEngine::new(&Default::default()).unwrap();
    let masked = engine.mask("   \t  ").unwrap();
    assert!(!masked.has_detections());
    assert_eq!(masked.masked_text, "   \t  ");
}

#[test]
fn test_out_of_range_span_fails_request() {
    let bogus = PiiEntity {
        position: Span::new(5, 50),
        classification: PiiLabel::Email,
        entity: "x".to_string(),
        detection_method: DetectionMethod::Regex,
        confidence: 1.0,
    };
    let engine = MaskingEngine::with_detectors(
        Arc::new(FixedDetector(vec![bogus])),
        default_name_detector(),
        None,
    );

    let err = engine.mask("short text").unwrap_err();
    assert!(matches!(
        err,
        TriageError::Masking(MaskingError::InvalidSpan { end: 50, .. })
    ));
}

#[test]
fn test_name_label_from_pattern_detector_rejected() {
    let text = "John Smith";
    let engine = MaskingEngine::with_detectors(
        Arc::new(FixedDetector(vec![entity(PiiLabel::FullName, text, 0, 10)])),
        default_name_detector(),
        None,
    );

    let err = engine.mask(text).unwrap_err();
    assert!(matches!(
        err,
        TriageError::Masking(MaskingError::UnexpectedLabel { .. })
    ));
}

#[test]
fn test_builtin_detectors_report_their_methods() {
    let text = "Contact Michael Brown on michael@example.com";
    let regex = RegexDetector::new().unwrap();
    let names = NameDetector::load(None).unwrap();

    assert!(regex
        .detect(text)
        .unwrap()
        .iter()
        .all(|e| e.detection_method == DetectionMethod::Regex && e.classification.is_pattern_label()));
    assert!(names
        .detect(text)
        .unwrap()
        .iter()
        .all(|e| e.detection_method == DetectionMethod::Ner && e.classification == PiiLabel::FullName));
}
