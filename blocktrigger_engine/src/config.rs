//! Engine configuration and config-file discovery.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::transfer::TRANSFER_CHANNEL;

/// Environment variable naming the trigger file explicitly.
pub const CONFIG_ENV: &str = "BLOCKTRIGGER_CONFIG";

/// File name looked for when no path is given.
pub const CONFIG_FILE_NAME: &str = "triggers.toml";

/// Cached default location of the trigger file.
static DEFAULT_CONFIG_PATH: LazyLock<PathBuf> = LazyLock::new(detect_config_path);

/// Default trigger file: `$BLOCKTRIGGER_CONFIG`, else the first existing candidate.
pub fn default_config_path() -> PathBuf {
    DEFAULT_CONFIG_PATH.clone()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Trigger definitions file, read on every reload.
    pub config_path: PathBuf,
    /// Plugin channel carrying transfer requests to the proxy.
    pub transfer_channel: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            transfer_channel: TRANSFER_CHANNEL.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::default()
        }
    }
}

fn detect_config_path() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let mut candidates = vec![
        PathBuf::from(CONFIG_FILE_NAME),
        Path::new("data").join(CONFIG_FILE_NAME),
    ];
    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join(CONFIG_FILE_NAME));
        candidates.push(dir.join("data").join(CONFIG_FILE_NAME));
    }

    first_existing(candidates).unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.is_file())
}
