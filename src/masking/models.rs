//! PII entity data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of PII/PCI labels produced by the detectors
///
/// `FullName` is produced only by the named-entity detector, every other
/// label only by the pattern detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiLabel {
    /// Email addresses
    Email,
    /// Telephone numbers with optional international prefix
    PhoneNumber,
    /// Dates of birth (D/M/YYYY)
    Dob,
    /// Aadhaar national ID numbers (12 digits)
    AadharNum,
    /// Credit/debit card numbers (16 digits)
    CreditDebitNo,
    /// Card verification values following a `CVV` prefix
    CvvNo,
    /// Card expiry dates (M/YY or M/YYYY)
    ExpiryNo,
    /// Person names
    FullName,
}

impl PiiLabel {
    /// All labels, pattern labels first in pattern iteration order
    pub const ALL: [PiiLabel; 8] = [
        Self::Email,
        Self::PhoneNumber,
        Self::Dob,
        Self::AadharNum,
        Self::CreditDebitNo,
        Self::CvvNo,
        Self::ExpiryNo,
        Self::FullName,
    ];

    /// Wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Dob => "dob",
            Self::AadharNum => "aadhar_num",
            Self::CreditDebitNo => "credit_debit_no",
            Self::CvvNo => "cvv_no",
            Self::ExpiryNo => "expiry_no",
            Self::FullName => "full_name",
        }
    }

    /// Bracketed placeholder that replaces a span of this label
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }

    /// Whether this label can only come from the pattern detector
    pub fn is_pattern_label(&self) -> bool {
        !matches!(self, Self::FullName)
    }
}

impl fmt::Display for PiiLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Unknown PII label: {s}"))
    }
}

/// Detection method used to identify PII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Regex pattern matching
    Regex,
    /// Statistical named-entity recognition
    Ner,
}

/// Half-open byte interval `[start, end)` into the original text
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[usize; 2]", try_from = "[usize; 2]")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the span is a valid slice of `text`
    pub fn fits(&self, text: &str) -> bool {
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// Slice `text` at this span, `None` if the span doesn't fit
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl From<Span> for [usize; 2] {
    fn from(span: Span) -> Self {
        [span.start, span.end]
    }
}

impl TryFrom<[usize; 2]> for Span {
    type Error = String;

    fn try_from([start, end]: [usize; 2]) -> Result<Self, Self::Error> {
        if start > end {
            return Err(format!("span start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }
}

/// Detected PII entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    /// Position in the original (unmasked) text
    pub position: Span,
    /// PII label
    pub classification: PiiLabel,
    /// Literal substring of the original text at `position`
    pub entity: String,
    /// Detection method used
    pub detection_method: DetectionMethod,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl PiiEntity {
    /// Create an entity by slicing `text` at `[start, end)`
    ///
    /// Returns `None` when the interval is not a valid slice of `text`.
    pub fn from_text(
        classification: PiiLabel,
        text: &str,
        start: usize,
        end: usize,
        detection_method: DetectionMethod,
    ) -> Option<Self> {
        let position = Span::new(start, end);
        let entity = position.slice(text)?.to_string();
        Some(Self {
            position,
            classification,
            entity,
            detection_method,
            confidence: 1.0,
        })
    }

    /// Set the confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Whether slicing `text` at this entity's position reproduces `entity`
    pub fn matches_source(&self, text: &str) -> bool {
        self.position.slice(text) == Some(self.entity.as_str())
    }
}

/// Output of the masking stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskedEmail {
    /// Text with every detected span replaced by its placeholder
    pub masked_text: String,
    /// Detected entities sorted by ascending start, offsets into the original text
    pub entities: Vec<PiiEntity>,
}

impl MaskedEmail {
    /// Get total number of detections
    pub fn total_detections(&self) -> usize {
        self.entities.len()
    }

    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.entities.is_empty()
    }
}
