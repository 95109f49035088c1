//! Configuration management for the triage service.
//!
//! # Overview
//!
//! Configuration is a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `TRIAGE_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use email_triage::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("email-triage.toml")?;
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServerConfig`] - HTTP bind address
//! - [`MaskingConfig`] - NER model override and audit log
//! - [`ClassifierConfig`] - Model artifact and training dataset
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [masking.audit]
//! enabled = true
//! log_path = "./audit/masking.log"
//!
//! [classifier]
//! model_path = "./models/email_classifier.json"
//! dataset_path = "${TRIAGE_DATASET}"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::classifier::config::ClassifierConfig;
pub use crate::masking::config::{AuditConfig, MaskingConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, ServerConfig, TriageConfig};
