//! # Email Triage
//!
//! Support-email triage: detect and mask PII/PCI in an email body, then
//! classify the masked text into a support category.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** pattern PII (emails, phones, dates of birth, Aadhaar,
//!   card numbers, CVVs, expiry dates) and person names
//! - **Masking** every detected span with a `[label]` placeholder while
//!   keeping offsets into the original text
//! - **Classifying** the masked email with a TF-IDF nearest-centroid model
//! - **Serving** the pipeline over HTTP
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`masking`] - PII detectors and the right-to-left masking algorithm
//! - [`classifier`] - Text normalisation, TF-IDF and the category model
//! - [`service`] - The preprocess, mask, classify pipeline
//! - [`server`] - HTTP API
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use email_triage::config::load_config_or_default;
//! use email_triage::service::TriageService;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("email-triage.toml")?;
//! let service = TriageService::from_config(&config.masking, &config.classifier)?;
//!
//! let outcome = service.process("Hi, my card 4111 1111 1111 1111 was charged twice.")?;
//! println!("{} -> {}", outcome.masked_email, outcome.category_of_the_email);
//! # Ok(())
//! # }
//! ```
//!
//! ## Masking only
//!
//! ```rust
//! use email_triage::masking::{MaskingEngine, PiiLabel};
//! use email_triage::config::MaskingConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = MaskingEngine::new(&MaskingConfig::default())?;
//! let masked = engine.mask("Contact me at jane.doe@example.com tomorrow.")?;
//!
//! assert_eq!(masked.masked_text, "Contact me at [email] tomorrow.");
//! assert_eq!(masked.entities[0].classification, PiiLabel::Email);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::TriageError`]. Detector contract
//! violations surface as [`domain::MaskingError`] and fail the request.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod masking;
pub mod server;
pub mod service;
