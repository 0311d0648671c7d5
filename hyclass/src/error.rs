use strum::EnumIs;
use thiserror::Error;

use crate::tier::Tier;

/// Failure reported by the `check` walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// Some part of the tree uses a feature that the requested tier does not support.
    ///
    /// Only the requested tier is reported. The offending feature and its location
    /// are logged at debug level but are not part of the error.
    #[error(
        "The class tree uses a feature that is not available at compatibility tier `{tier}`."
    )]
    UnsupportedFeatureForTier { tier: Tier },
}

pub type CheckResult = Result<(), Error>;

#[derive(Debug, EnumIs, Error)]
pub enum ConfigError {
    #[error("Failed to parse model configuration: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum TypePathError {
    /// A character that does not start any known step.
    #[error("Unexpected character `{found}` at position {position} in type path.")]
    UnexpectedCharacter { found: char, position: usize },

    /// A type argument index without its closing `;`.
    #[error("Type argument index starting at position {position} is not terminated by `;`.")]
    UnterminatedArgument { position: usize },

    /// A type argument index that does not fit in a byte.
    #[error("Type argument index {index} exceeds the maximum of 255.")]
    ArgumentOutOfRange { index: u32 },
}
