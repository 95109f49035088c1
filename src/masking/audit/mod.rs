//! Audit logging module
//!
//! Structured audit trail of masking operations. Entity values are stored
//! only as SHA-256 hashes.

pub mod logger;

pub use logger::AuditLogger;
