//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod classify;
pub mod init;
pub mod mask;
pub mod serve;
pub mod train;
pub mod validate;

use anyhow::Context;
use std::io::Read;

/// Use `text` when given, otherwise read the whole of stdin
fn read_input(text: Option<&str>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read email from stdin")?;
            Ok(buffer)
        }
    }
}
