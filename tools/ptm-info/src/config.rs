//! Settings file (`--config ptm.toml`)
//!
//! ```toml
//! log_filter = "nether_ptm=debug"
//!
//! [capacity]
//! patterns = 128
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use nether_tracker::ModuleCapacity;
use serde::{Deserialize, Serialize};

/// ptm-info settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoConfig {
    /// Container limits handed to the decoder
    #[serde(default)]
    pub capacity: ModuleCapacity,

    /// `tracing` filter used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            capacity: ModuleCapacity::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Load settings from `path`, or defaults when no file was given
pub fn load(path: Option<&Path>) -> Result<InfoConfig> {
    let Some(path) = path else {
        return Ok(InfoConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config: {}", path.display()))
}
