//! Domain types shared across the triage service.
//!
//! # Error Handling
//!
//! All fallible operations at module boundaries return [`Result<T, TriageError>`]:
//!
//! ```rust
//! use email_triage::domain::{Result, TriageError};
//!
//! fn example(body: &str) -> Result<()> {
//!     if body.is_empty() {
//!         return Err(TriageError::Validation("empty body".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::{MaskingError, TriageError};
pub use result::Result;
