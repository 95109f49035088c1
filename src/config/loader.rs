//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TriageConfig;
use crate::domain::errors::TriageError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TriageConfig
/// 4. Applies environment variable overrides (TRIAGE_* prefix, and PORT)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use email_triage::config::loader::load_config;
///
/// let config = load_config("email-triage.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TriageConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TriageError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TriageError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a file if it exists, otherwise from defaults
///
/// Environment overrides and validation apply either way, so the service
/// can run from environment variables alone.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<TriageConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(TriageConfig::default())
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<TriageConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: TriageConfig = toml::from_str(&contents)
        .map_err(|e| TriageError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: TriageConfig) -> Result<TriageConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        TriageError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TriageError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TriageError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using TRIAGE_* prefix
///
/// Environment variables follow the pattern: TRIAGE_<SECTION>_<KEY>
/// For example: TRIAGE_SERVER_PORT, TRIAGE_CLASSIFIER_MODEL_PATH.
/// `PORT` is honoured as well and wins over `TRIAGE_SERVER_PORT`.
fn apply_env_overrides(config: &mut TriageConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("TRIAGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("TRIAGE_SERVER_HOST") {
        config.server.host = val;
    }
    for var in ["TRIAGE_SERVER_PORT", "PORT"] {
        if let Ok(val) = std::env::var(var) {
            config.server.port = val
                .parse()
                .map_err(|_| TriageError::Configuration(format!("Invalid {var} value: {val}")))?;
        }
    }

    // Section overrides
    config
        .masking
        .apply_env_overrides()
        .map_err(|e| TriageError::Configuration(format!("{e:#}")))?;
    config
        .classifier
        .apply_env_overrides()
        .map_err(|e| TriageError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TRIAGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
