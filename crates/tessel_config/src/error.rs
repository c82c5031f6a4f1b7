//! Errors raised while reading `tessel.toml`.

use std::path::PathBuf;

/// Reasons a project configuration cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected layout.
    #[error("invalid tessel.toml: {0}")]
    Parse(String),

    /// A required key is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A key is present but its value is rejected.
    #[error("invalid value for `{key}`: {reason}")]
    Invalid {
        /// Dotted key path, e.g. `generate.pad_prefix`.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
