//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - optional JSON file logging with rotation
//!
//! Raw PII never goes to these logs; masking writes hashed values to its
//! own audit log instead.
//!
//! # Example
//!
//! ```no_run
//! use email_triage::logging::init_logging;
//! use email_triage::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use email_triage::log_error_with_context;
/// use email_triage::domain::TriageError;
///
/// let error = TriageError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
