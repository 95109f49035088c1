//! Pattern library for PII detection
//!
//! The rule set is fixed. Patterns are applied independently, in the order
//! listed in [`PATTERN_DEFINITIONS`], and the same character range may be
//! claimed by more than one of them.

use crate::masking::models::PiiLabel;
use anyhow::{Context, Result};
use regex::Regex;

/// Built-in patterns in iteration order
pub const PATTERN_DEFINITIONS: [(PiiLabel, &str); 7] = [
    (
        PiiLabel::Email,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    ),
    (
        PiiLabel::PhoneNumber,
        r"(?:\+\d{1,3}[\s-]?)?\(?\b\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b",
    ),
    (
        PiiLabel::Dob,
        r"\b(?:0?[1-9]|[12][0-9]|3[01])[/\-](?:0?[1-9]|1[012])[/\-]\d{4}\b",
    ),
    (PiiLabel::AadharNum, r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}\b"),
    (PiiLabel::CreditDebitNo, r"\b\d{4}(?:[\s-]?\d{4}){3}\b"),
    (PiiLabel::CvvNo, r"\b(?i:cvv):?\s*\d{3,4}\b"),
    (PiiLabel::ExpiryNo, r"\b(?:0?[1-9]|1[0-2])[/\-]\d{2,4}\b"),
];

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// PII label assigned to every match
    pub label: PiiLabel,
}

/// Pattern registry for PII detection
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Compile the built-in patterns
    pub fn new() -> Result<Self> {
        let patterns = PATTERN_DEFINITIONS
            .iter()
            .map(|(label, source)| {
                let regex = Regex::new(source)
                    .with_context(|| format!("Invalid regex for '{label}': {source}"))?;
                Ok(CompiledPattern {
                    regex,
                    label: *label,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Get all patterns in iteration order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get the pattern for a specific label
    pub fn pattern_for(&self, label: PiiLabel) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|p| p.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn first_match(label: PiiLabel, text: &str) -> Option<String> {
        let registry = PatternRegistry::new().unwrap();
        registry
            .pattern_for(label)
            .unwrap()
            .regex
            .find(text)
            .map(|m| m.as_str().to_string())
    }

    #[test]
    fn test_registry_covers_every_pattern_label() {
        let registry = PatternRegistry::new().unwrap();
        assert_eq!(registry.all_patterns().len(), 7);
        for label in PiiLabel::ALL.iter().filter(|l| l.is_pattern_label()) {
            assert!(registry.pattern_for(*label).is_some(), "missing {label}");
        }
        assert!(registry.pattern_for(PiiLabel::FullName).is_none());
    }

    #[test_case(PiiLabel::Email, "write to jane.doe@example.com today", "jane.doe@example.com" ; "email")]
    #[test_case(PiiLabel::Email, "a.b+c@mail.example.org", "a.b+c@mail.example.org" ; "email with plus and subdomain")]
    #[test_case(PiiLabel::PhoneNumber, "call 987-654-3210 now", "987-654-3210" ; "dashed phone")]
    #[test_case(PiiLabel::PhoneNumber, "call (555) 123-4567", "(555) 123-4567" ; "parenthesised area code")]
    #[test_case(PiiLabel::PhoneNumber, "reach +91 9876543210 anytime", "+91 9876543210" ; "international prefix")]
    #[test_case(PiiLabel::Dob, "born 15/08/1990 in", "15/08/1990" ; "slash dob")]
    #[test_case(PiiLabel::Dob, "born 5-1-1985", "5-1-1985" ; "dash dob single digits")]
    #[test_case(PiiLabel::AadharNum, "aadhaar 1234 5678 9012", "1234 5678 9012" ; "spaced aadhaar")]
    #[test_case(PiiLabel::AadharNum, "id 123456789012.", "123456789012" ; "compact aadhaar")]
    #[test_case(PiiLabel::CreditDebitNo, "card 4111-1111-1111-1111 ok", "4111-1111-1111-1111" ; "dashed card")]
    #[test_case(PiiLabel::CreditDebitNo, "card 4111 1111 1111 1111 exp", "4111 1111 1111 1111" ; "card excludes trailing space")]
    #[test_case(PiiLabel::CvvNo, "CVV: 123", "CVV: 123" ; "cvv with colon")]
    #[test_case(PiiLabel::CvvNo, "my cvv 4567", "cvv 4567" ; "lowercase cvv")]
    #[test_case(PiiLabel::ExpiryNo, "exp 09/25", "09/25" ; "short expiry")]
    #[test_case(PiiLabel::ExpiryNo, "valid till 12/2027", "12/2027" ; "long expiry")]
    fn test_pattern_matches(label: PiiLabel, text: &str, expected: &str) {
        assert_eq!(first_match(label, text).as_deref(), Some(expected));
    }

    #[test_case(PiiLabel::Email, "not-an-email@" ; "email without domain")]
    #[test_case(PiiLabel::Email, "user@host.c" ; "single letter tld")]
    #[test_case(PiiLabel::Dob, "32/01/1990" ; "day out of range")]
    #[test_case(PiiLabel::Dob, "12/13/1990" ; "month out of range")]
    #[test_case(PiiLabel::CvvNo, "CVV 12" ; "cvv too short")]
    #[test_case(PiiLabel::ExpiryNo, "13/25" ; "expiry month out of range")]
    #[test_case(PiiLabel::CreditDebitNo, "4111 1111 1111" ; "twelve digits is not a card")]
    fn test_pattern_rejects(label: PiiLabel, text: &str) {
        assert_eq!(first_match(label, text), None);
    }
}
