//! Error types for library loading and saving.

use std::path::PathBuf;
use tessel_common::PatternError;

/// Errors that can occur while reading or writing library files.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// A library file or directory could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A library file is not valid YAML of the expected shape.
    #[error("failed to parse library '{library}': {message}")]
    Parse {
        /// The library name (file stem).
        library: String,
        /// The parser's description of the problem.
        message: String,
    },

    /// Entries could not be serialized back to YAML.
    #[error("failed to serialize library '{library}': {message}")]
    Serialize {
        /// The library name (file stem).
        library: String,
        /// The serializer's description of the problem.
        message: String,
    },

    /// No loaded entry belongs to the named library.
    #[error("no {kind} library named '{name}' is loaded")]
    UnknownLibrary {
        /// What the library holds (`bus` or `module`).
        kind: &'static str,
        /// The requested library name.
        name: String,
    },

    /// A library selection pattern was invalid.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
