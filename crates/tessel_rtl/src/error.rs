//! Fatal errors for RTL generation.

use std::path::PathBuf;

/// Errors that abort generation of one RTL file.
#[derive(Debug, thiserror::Error)]
pub enum RtlError {
    /// Generation was asked for on a netlist that cannot produce a module.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_precondition() {
        let err = RtlError::Precondition("netlist has no instances".to_string());
        assert_eq!(err.to_string(), "precondition failed: netlist has no instances");
    }

    #[test]
    fn display_io() {
        let err = RtlError::Io {
            path: PathBuf::from("/out/soc.v"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write /out/soc.v: denied");
    }
}
