//! Triage service facade
//!
//! Glues preprocessing, masking and classification into the single
//! operation exposed over HTTP and the CLI.

pub mod preprocess;
pub mod response;
pub mod triage;

pub use preprocess::preprocess_email_text;
pub use response::{wire_entities, ClassificationOutcome, MaskedEntity, MaskingOutcome};
pub use triage::TriageService;
