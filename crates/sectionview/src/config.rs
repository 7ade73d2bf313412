//! Adapter configuration.
//!
//! Settings are fixed when an adapter is constructed. They can be built in
//! code or loaded from the application's TOML settings:
//!
//! ```
//! use sectionview::AdapterConfig;
//!
//! let config = AdapterConfig::from_toml_str("share_item_type = true").unwrap();
//! assert!(config.share_item_type);
//! assert!(!config.prune_type_codes_on_refresh);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Construction-time settings for a [`HeterogeneousAdapter`](crate::HeterogeneousAdapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Use section subtypes directly as type codes, so sections emitting equal
    /// subtypes share the host's view pool. When `false`, each section's
    /// subtypes are zipped with its section id and bounded to `[0, 99]`.
    pub share_item_type: bool,

    /// Forget every observed type code whenever the whole data set is
    /// refreshed. When `false`, the type-code map only grows, except for
    /// entries purged when their section is removed.
    pub prune_type_codes_on_refresh: bool,
}

impl AdapterConfig {
    /// Default settings: non-shared item types, append-only type-code map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with shared item types.
    pub fn shared() -> Self {
        Self {
            share_item_type: true,
            ..Self::default()
        }
    }

    /// Sets whether item types are shared across sections.
    pub fn with_share_item_type(mut self, share: bool) -> Self {
        self.share_item_type = share;
        self
    }

    /// Sets whether type codes are forgotten on a full refresh.
    pub fn with_prune_type_codes_on_refresh(mut self, prune: bool) -> Self {
        self.prune_type_codes_on_refresh = prune;
        self
    }

    /// Parses settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
