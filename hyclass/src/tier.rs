//! Compatibility tiers and the feature table gating them.
//!
//! Tiers are strictly ordered: every feature available at a tier is also
//! available at every later tier. The table in [`Feature::minimum_tier`] is the
//! only place where a feature is tied to a tier.
use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

use crate::error::{CheckResult, Error};

/// A compatibility level of the class format.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[repr(u32)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Baseline: annotations, inner classes, generic signatures.
    V4 = 4,
    /// Adds type annotations and method parameter records.
    V5 = 5,
    /// Adds module descriptors.
    V6 = 6,
    /// Adds nest-based access control.
    V7 = 7,
    /// Adds records.
    #[default]
    V8 = 8,
    /// Unstable features, currently only permitted subtypes.
    Experimental = 9,
}

impl Tier {
    /// The most permissive tier.
    pub const LATEST: Tier = Tier::Experimental;

    /// Whether `feature` may appear in a class checked at this tier.
    pub fn supports(self, feature: Feature) -> bool {
        feature.is_supported_by(self)
    }
}

/// Structural features that only exist from a given tier onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Feature {
    TypeAnnotations,
    MethodParameters,
    Modules,
    Nesting,
    Records,
    PermittedSubtypes,
}

impl Feature {
    /// First tier at which the feature is accepted.
    pub const fn minimum_tier(self) -> Tier {
        match self {
            Feature::TypeAnnotations | Feature::MethodParameters => Tier::V5,
            Feature::Modules => Tier::V6,
            Feature::Nesting => Tier::V7,
            Feature::Records => Tier::V8,
            Feature::PermittedSubtypes => Tier::Experimental,
        }
    }

    pub fn is_supported_by(self, tier: Tier) -> bool {
        match self {
            // Gated on the exact tier rather than a lower bound.
            Feature::PermittedSubtypes => tier == Tier::Experimental,
            _ => tier >= self.minimum_tier(),
        }
    }
}

/// Rejects `tier` when `present` is set and `feature` is not available there.
pub(crate) fn require(tier: Tier, feature: Feature, present: bool, owner: &str) -> CheckResult {
    if present && !feature.is_supported_by(tier) {
        debug!("`{owner}` uses {feature}, which is unavailable at tier {tier}");
        return Err(Error::UnsupportedFeatureForTier { tier });
    }
    Ok(())
}
