//! Container capacities for a [`TrackerModule`](crate::TrackerModule)
//!
//! Capacities are the contract between the caller that owns the module and
//! the decoder that fills it. They can be loaded from TOML/JSON like any other
//! settings section.

use serde::{Deserialize, Serialize};

/// Fixed capacities of the module containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCapacity {
    /// Maximum order list length (default: 256)
    #[serde(default = "default_orders")]
    pub orders: usize,
    /// Maximum number of instruments (default: 255)
    #[serde(default = "default_instruments")]
    pub instruments: usize,
    /// Maximum number of physical samples (default: 255)
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Maximum number of patterns (default: 256)
    #[serde(default = "default_patterns")]
    pub patterns: usize,
}

impl Default for ModuleCapacity {
    fn default() -> Self {
        Self {
            orders: default_orders(),
            instruments: default_instruments(),
            samples: default_samples(),
            patterns: default_patterns(),
        }
    }
}

fn default_orders() -> usize {
    256
}
fn default_instruments() -> usize {
    255
}
fn default_samples() -> usize {
    255
}
fn default_patterns() -> usize {
    256
}
