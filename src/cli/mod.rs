//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the triage service using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Email Triage - support-email PII masking and classification
#[derive(Parser, Debug)]
#[command(name = "email-triage")]
#[command(version, about, long_about = None)]
#[command(author = "Email Triage Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "email-triage.toml", env = "TRIAGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIAGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP classification API
    Serve(commands::serve::ServeArgs),

    /// Detect and mask PII in a single email
    Mask(commands::mask::MaskArgs),

    /// Mask and classify a single email
    Classify(commands::classify::ClassifyArgs),

    /// Train the category classifier from a CSV dataset
    Train(commands::train::TrainArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
