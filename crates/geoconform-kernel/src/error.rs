//! Errors raised while building a validator container.
//!
//! Validation itself never errors: failures are recorded in the report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid container config toml: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render container config as toml: {source}")]
    Render {
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid tolerance for {scope}: {value} (must be finite and non-negative)")]
    InvalidTolerance { scope: String, value: f64 },

    #[error("invalid max_depth: {0} (must be at least 1)")]
    InvalidMaxDepth(usize),

    #[error("unknown validator category: {0}")]
    UnknownCategory(String),
}
