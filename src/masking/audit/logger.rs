//! Audit logger for masking operations

use crate::masking::models::{MaskedEmail, PiiEntity};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    request_id: String,
    text_length: usize,
    detections_count: usize,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    classification: String,
    position: [usize; 2],
    detection_method: String,
    confidence: f32,
    /// SHA-256 hash of the original value (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for masking operations
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    // serialises appends from concurrent requests
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    /// Record one masking operation
    ///
    /// Returns the generated request id.
    pub fn log_masking(
        &self,
        text: &str,
        result: &MaskedEmail,
        processing_time_ms: u64,
    ) -> Result<Uuid> {
        let request_id = Uuid::new_v4();
        let timestamp: DateTime<Utc> = Utc::now();

        let entry = AuditLogEntry {
            timestamp: timestamp.to_rfc3339(),
            request_id: request_id.to_string(),
            text_length: text.len(),
            detections_count: result.entities.len(),
            processing_time_ms,
            detections: result
                .entities
                .iter()
                .map(|e| self.create_audit_detection(e))
                .collect(),
        };

        self.write_entry(&entry)?;
        Ok(request_id)
    }

    fn create_audit_detection(&self, entity: &PiiEntity) -> AuditDetection {
        AuditDetection {
            classification: entity.classification.to_string(),
            position: [entity.position.start, entity.position.end],
            detection_method: format!("{:?}", entity.detection_method),
            confidence: entity.confidence,
            value_hash: hash_pii_value(&entity.entity),
        }
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry).context("Failed to serialize audit entry")?
        } else {
            format!(
                "[{}] Request: {} | Length: {} | Detections: {} | Time: {}ms",
                entry.timestamp,
                entry.request_id,
                entry.text_length,
                entry.detections_count,
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Audit log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "{line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("log_path", &self.log_path)
            .field("json_format", &self.json_format)
            .finish()
    }
}

/// Hash a PII value using SHA-256
fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::models::{DetectionMethod, PiiLabel};
    use tempfile::tempdir;

    fn masked_email(text: &str) -> MaskedEmail {
        let entity =
            PiiEntity::from_text(PiiLabel::Email, text, 14, 34, DetectionMethod::Regex).unwrap();
        MaskedEmail {
            masked_text: "Contact me at [email] tomorrow.".to_string(),
            entities: vec![entity],
        }
    }

    #[test]
    fn test_hash_pii_value() {
        let hash1 = hash_pii_value("test@example.com");
        let hash2 = hash_pii_value("test@example.com");
        let hash3 = hash_pii_value("different@example.com");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");

        AuditLogger::new(log_path.clone(), true).unwrap();
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_log_masking_never_writes_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        let text = "Contact me at jane.doe@example.com tomorrow.";
        let request_id = logger.log_masking(text, &masked_email(text), 3).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains(&request_id.to_string()));
        assert!(content.contains(&hash_pii_value("jane.doe@example.com")));
        assert!(!content.contains("jane.doe@example.com"));

        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["detections_count"], 1);
        assert_eq!(entry["detections"][0]["classification"], "email");
        assert_eq!(entry["detections"][0]["position"][0], 14);
    }

    #[test]
    fn test_plain_text_format_appends_lines() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();

        let text = "Contact me at jane.doe@example.com tomorrow.";
        logger.log_masking(text, &masked_email(text), 1).unwrap();
        logger.log_masking(text, &masked_email(text), 2).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Detections: 1"));
        assert!(!content.contains("jane.doe"));
    }
}
