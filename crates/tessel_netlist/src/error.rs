//! Fatal errors for netlist loading and expansion.

use std::path::PathBuf;

/// Errors that abort processing of one netlist document.
///
/// Per-item problems (an unknown instance in a bus group, a malformed net)
/// are never reported here; they become warnings in the diagnostic sink.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// The netlist file could not be read.
    #[error("failed to read netlist {path}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("failed to parse netlist: {0}")]
    Parse(String),

    /// A required top-level section is absent.
    #[error("netlist has no `{0}` section")]
    MissingSection(&'static str),

    /// A top-level section is not a map.
    #[error("netlist section `{section}` must be a map, found {found}")]
    InvalidSection {
        /// The offending section.
        section: &'static str,
        /// The kind of node found instead.
        found: &'static str,
    },

    /// An operation was invoked on a document that cannot support it.
    #[error("precondition failed: {0}")]
    Precondition(String),
}
