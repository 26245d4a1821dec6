//! Run configuration.

use lineblock_eval::{DEFAULT_GAS_LIMIT, DEFAULT_MAX_STRING_LEN};
use lineblock_lexer::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Knobs for a single run. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// How deeply side-scans may nest before the scan fails.
    pub max_scan_depth: usize,
    /// Evaluation steps allowed before the run is aborted.
    pub gas_limit: u64,
    /// Longest string, in bytes, that `+` or `*` may build.
    pub max_string_len: usize,
    /// Let `GOTO` transfer control. When off, reaching a `GOTO` is an error.
    pub goto_enabled: bool,
    /// Prepended to the error text sent to the host.
    pub error_prefix: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_scan_depth: DEFAULT_MAX_DEPTH,
            gas_limit: DEFAULT_GAS_LIMIT,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            goto_enabled: false,
            error_prefix: "[LineBlock]".to_string(),
        }
    }
}

impl RunConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain scalars always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}
