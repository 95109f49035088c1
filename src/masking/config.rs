//! Masking configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Masking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Path to a NER model artifact (JSON); the embedded model is used when unset
    #[serde(default)]
    pub ner_model_path: Option<PathBuf>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl MaskingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.ner_model_path {
            if !path.exists() {
                anyhow::bail!("NER model file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                anyhow::bail!("NER model must be a JSON file: {}", path.display());
            }
        }

        self.audit
            .validate()
            .context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("TRIAGE_MASKING_NER_MODEL_PATH") {
            self.ner_model_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines for audit entries
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/masking.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("audit.log_path cannot be empty when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("TRIAGE_MASKING_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid TRIAGE_MASKING_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("TRIAGE_MASKING_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("TRIAGE_MASKING_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid TRIAGE_MASKING_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
