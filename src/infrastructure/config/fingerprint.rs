//! Browser fingerprint configuration.

use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionStrategy;

/// `[fingerprint]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FingerprintConfig {
    pub selection_strategy: SelectionStrategy,
    pub enable_rotation: bool,
    /// Seconds between rotations.
    pub rotation_interval: u64,
    /// Empty means the bundled library.
    pub library_path: String,
    /// Empty means every browser.
    pub browsers: Vec<String>,
    pub os_randomization: bool,
    pub ua_randomization: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            selection_strategy: SelectionStrategy::Random,
            enable_rotation: true,
            rotation_interval: 300,
            library_path: String::new(),
            browsers: Vec::new(),
            os_randomization: true,
            ua_randomization: true,
        }
    }
}
