//! Result type alias for the triage service

use super::errors::TriageError;

/// Result type alias for triage operations
///
/// # Examples
///
/// ```
/// use email_triage::domain::result::Result;
/// use email_triage::domain::errors::TriageError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TriageError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TriageError>;
