//! Loader utilities for building triggers from the TOML configuration.
//!
//! Loading is all-or-nothing: the file is parsed and validated as a whole,
//! and any problem rejects the entire load so that a registry is never
//! populated from a partially understood file.

pub mod triggers;

use std::fs;
use std::path::{Path, PathBuf};

use blocktrigger_data::{TriggerFile, ValidationError};
use thiserror::Error;

pub use triggers::build_triggers;

/// Why a trigger configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading trigger config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing trigger config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("trigger config failed validation:\n{}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read and parse a trigger file without validating it.
///
/// # Errors
/// - on file IO or TOML deserialization failure
pub fn load_trigger_file(path: &Path) -> Result<TriggerFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trigger_file(&text)
}

/// Parse trigger definitions from TOML text.
///
/// # Errors
/// - on TOML deserialization failure
pub fn parse_trigger_file(text: &str) -> Result<TriggerFile, ConfigError> {
    Ok(toml::from_str(text)?)
}
