//! Model configuration.
//!
//! Configuration is usually embedded in a larger TOML manifest; only the keys
//! below are recognised:
//!
//! ```toml
//! replace_policy = "move_to_end"
//! default_tier = "v7"
//! ```
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, tier::Tier};

/// Where an entry lands when it replaces an existing entry with the same key.
///
/// Applies to field maps (keyed by name), method maps (keyed by name and
/// descriptor), annotation maps (keyed by descriptor) and annotation element maps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// The new entry takes over the slot of the entry it replaces.
    #[default]
    InPlace,

    /// The old entry is removed and the new one is appended.
    MoveToEnd,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub replace_policy: ReplacePolicy,
    /// Tier used by [`ClassModel::check_default`](crate::class::ClassModel::check_default).
    pub default_tier: Tier,
}

impl ModelConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_replace_policy(mut self, replace_policy: ReplacePolicy) -> Self {
        self.replace_policy = replace_policy;
        self
    }

    pub fn with_default_tier(mut self, default_tier: Tier) -> Self {
        self.default_tier = default_tier;
        self
    }
}
