//! Domain error types
//!
//! This module defines the error hierarchy for the triage service.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main triage error type
///
/// This is the primary error type used throughout the application.
/// Startup failures (`Configuration`, `ModelLoad`) are fatal; everything
/// else fails a single request and is turned into a response at the boundary.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A model artifact (NER model or classifier) is missing or corrupt
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// PII detection or masking errors
    #[error("Masking error: {0}")]
    Masking(#[from] MaskingError),

    /// Category classifier errors
    #[error("Classification error: {0}")]
    Classification(String),

    /// Training dataset errors
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Masking-specific errors
///
/// Raised while reconciling detector output. A detector returning a span
/// that does not index the input text is a contract violation and fails
/// the request instead of producing corrupted offsets.
#[derive(Debug, Error)]
pub enum MaskingError {
    /// A detector returned a span outside the text or off a character boundary
    #[error("Detector '{detector}' returned invalid span [{start}, {end}) for text of length {len}")]
    InvalidSpan {
        detector: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A detector returned a span whose literal text does not match the input
    #[error("Detector '{detector}' returned span [{start}, {end}) that does not match its entity text")]
    EntityMismatch {
        detector: String,
        start: usize,
        end: usize,
    },

    /// A detector produced a label it does not own
    #[error("Detector '{detector}' emitted label '{label}' outside its label set")]
    UnexpectedLabel { detector: String, label: String },

    /// A detector failed internally
    #[error("Detector '{detector}' failed: {message}")]
    DetectorFailed { detector: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for TriageError {
    fn from(err: csv::Error) -> Self {
        TriageError::Dataset(format!("CSV error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_error_display() {
        let err = TriageError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_masking_error_conversion() {
        let masking_err = MaskingError::InvalidSpan {
            detector: "regex".to_string(),
            start: 10,
            end: 4,
            len: 8,
        };
        let triage_err: TriageError = masking_err.into();
        assert!(matches!(triage_err, TriageError::Masking(_)));
        assert!(triage_err.to_string().contains("[10, 4)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let triage_err: TriageError = io_err.into();
        assert!(matches!(triage_err, TriageError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let triage_err: TriageError = json_err.into();
        assert!(matches!(triage_err, TriageError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let triage_err: TriageError = toml_err.into();
        assert!(matches!(triage_err, TriageError::Configuration(_)));
        assert!(triage_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_csv_error_conversion() {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .from_reader("a,b\n1,2,3\n".as_bytes());
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("ragged row should fail");
        let triage_err: TriageError = err.into();
        assert!(matches!(triage_err, TriageError::Dataset(_)));
    }

    #[test]
    fn test_triage_error_implements_std_error() {
        let err = TriageError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
