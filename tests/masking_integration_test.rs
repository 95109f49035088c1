//! Integration tests for the masking pipeline with the built-in detectors

use email_triage::config::{AuditConfig, MaskingConfig};
use email_triage::masking::{MaskedEmail, MaskingEngine, PiiLabel, Span};
use tempfile::TempDir;

fn engine() -> MaskingEngine {
    MaskingEngine::new(&MaskingConfig::default()).expect("Failed to create engine")
}

fn mask(text: &str) -> MaskedEmail {
    engine().mask(text).expect("Failed to mask text")
}

fn find(masked: &MaskedEmail, label: PiiLabel) -> Vec<(usize, usize, &str)> {
    masked
        .entities
        .iter()
        .filter(|e| e.classification == label)
        .map(|e| (e.position.start, e.position.end, e.entity.as_str()))
        .collect()
}

#[test]
fn test_email_scenario() {
    let masked = mask("Contact me at jane.doe@example.com tomorrow.");

    assert_eq!(masked.total_detections(), 1);
    assert_eq!(find(&masked, PiiLabel::Email), vec![(14, 34, "jane.doe@example.com")]);
    assert_eq!(masked.masked_text, "Contact me at [email] tomorrow.");
}

#[test]
fn test_card_scenario() {
    let text = "Card: 4111 1111 1111 1111 exp 09/25";
    let masked = mask(text);

    assert_eq!(
        find(&masked, PiiLabel::CreditDebitNo),
        vec![(6, 25, "4111 1111 1111 1111")]
    );
    assert_eq!(find(&masked, PiiLabel::ExpiryNo), vec![(30, 35, "09/25")]);
    // The aadhaar pattern also claims the first twelve digits
    assert_eq!(find(&masked, PiiLabel::AadharNum), vec![(6, 20, "4111 1111 1111")]);

    assert!(!masked.masked_text.chars().any(|c| c.is_ascii_digit()));
    assert_eq!(masked.masked_text, "Card: [aadhar_num]no] exp [expiry_no]");
}

#[test]
fn test_name_and_email_scenario() {
    let masked = mask("John Smith's email is john@x.com");

    assert_eq!(find(&masked, PiiLabel::FullName), vec![(0, 10, "John Smith")]);
    assert_eq!(find(&masked, PiiLabel::Email), vec![(22, 32, "john@x.com")]);
    assert_eq!(masked.masked_text, "[full_name]'s email is [email]");
}

#[test]
fn test_empty_text() {
    let masked = mask("");
    assert!(!masked.has_detections());
    assert_eq!(masked.masked_text, "");
}

#[test]
fn test_text_without_pii_is_unchanged() {
    let masked = mask("Please check order status.");
    assert!(!masked.has_detections());
    assert_eq!(masked.masked_text, "Please check order status.");
}

#[test]
fn test_every_entity_indexes_the_original_text() {
    let text = "Hi, I am Sarah Johnson. Call +91 9876543210 or mail sarah.j@example.org. \
                DOB 12/04/1988, card 5500-0000-0000-0004, CVV: 321.";
    let masked = mask(text);

    assert!(masked.total_detections() >= 5);
    for entity in &masked.entities {
        let Span { start, end } = entity.position;
        assert!(start <= end && end <= text.len());
        assert_eq!(&text[start..end], entity.entity);
    }
}

#[test]
fn test_entities_sorted_by_start() {
    let masked = mask("Mail a@b.io, then b@c.io, call 987-654-3210 and ask for Emily Davis.");
    let starts: Vec<usize> = masked.entities.iter().map(|e| e.position.start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn test_detected_values_leave_masked_text() {
    let text = "Reach Robert Brown at robert.brown@example.com or 555-123-4567.";
    let masked = mask(text);

    for entity in &masked.entities {
        assert!(
            !masked.masked_text.contains(&entity.entity),
            "{} still present in {}",
            entity.entity,
            masked.masked_text
        );
    }
    assert!(masked.masked_text.contains("[full_name]"));
    assert!(masked.masked_text.contains("[email]"));
    assert!(masked.masked_text.contains("[phone_number]"));
}

#[test]
fn test_masking_is_deterministic() {
    let text = "Dear Mr. Brown, your card 4111 1111 1111 1111 expires 12/27.";
    let engine = engine();
    let first = engine.mask(text).unwrap();
    let second = engine.mask(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_name_detector_only_labels_full_names() {
    let masked = mask("Dear Mr. Brown, write to brown@example.com from London.");

    assert_eq!(find(&masked, PiiLabel::FullName), vec![(9, 14, "Brown")]);
    assert!(masked
        .entities
        .iter()
        .all(|e| e.entity != "London" && e.entity != "Dear"));
}

#[test]
fn test_sentence_opening_given_names_stay_unmasked() {
    for text in ["Mark my ticket as resolved.", "Grace period ended. Hope this helps."] {
        let masked = mask(text);
        assert!(!masked.has_detections(), "unexpected entities in {text}");
        assert_eq!(masked.masked_text, text);
    }
}

#[test]
fn test_audit_log_written_without_raw_values() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("audit").join("masking.log");
    let config = MaskingConfig {
        ner_model_path: None,
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        },
    };

    let engine = MaskingEngine::new(&config).unwrap();
    assert!(engine.is_audited());
    engine
        .mask("Contact me at jane.doe@example.com tomorrow.")
        .unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let entry: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(entry["detections_count"], 1);
    assert_eq!(entry["detections"][0]["classification"], "email");
    assert!(!contents.contains("jane.doe@example.com"));
}

#[test]
fn test_custom_ner_model_path() {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("ner.json");
    std::fs::write(
        &model_path,
        serde_json::json!({
            "name": "tiny",
            "version": "0.1.0",
            "threshold": 0.5,
            "max_span_tokens": 3,
            "weights": {
                "bias": -1.5,
                "given_name": 2.0,
                "surname": 1.5,
                "title_prefix": 2.5,
                "multi_token": 1.0,
                "sentence_initial": -0.5,
                "unknown_token": -0.25
            },
            "given_names": ["Zanele"],
            "surnames": ["Mokoena"],
            "titles": ["Mr"],
            "non_names": ["Hello"],
            "organizations": [],
            "locations": []
        })
        .to_string(),
    )
    .unwrap();

    let config = MaskingConfig {
        ner_model_path: Some(model_path),
        ..MaskingConfig::default()
    };
    let engine = MaskingEngine::new(&config).unwrap();
    let masked = engine.mask("Hello, this is Zanele Mokoena.").unwrap();

    assert_eq!(masked.masked_text, "Hello, this is [full_name].");
}
