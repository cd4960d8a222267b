//! # Provider Configuration
//!
//! Settings shared by every provider a page creates. Everything has a
//! default, so an empty document is a valid configuration:
//! ```json
//! {
//!   "transition": {
//!     "legacySkuFallback": true,
//!     "refreshQueryOnSetProduct": false
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use summary_core::{ConfigResult, ProviderProps, TransitionOptions};
use tracing::debug;

/// Provider-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryConfig {
    /// Options handed to the transition function.
    pub transition: TransitionOptions,
}

impl SummaryConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SummaryConfig = serde_json::from_str(json)?;
        debug!(?config, "Loaded product summary config");
        Ok(config)
    }
}

/// Parses provider props sent by the frontend.
pub fn props_from_json(json: &str) -> ConfigResult<ProviderProps> {
    Ok(serde_json::from_str(json)?)
}
