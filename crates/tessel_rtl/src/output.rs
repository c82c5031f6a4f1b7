//! Generated RTL text and writing it to disk.

use crate::error::RtlError;
use std::fmt;
use std::path::{Path, PathBuf};

/// The Verilog source of one generated module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtlText(String);

impl RtlText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    /// Returns the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Writes the text to `<dir>/<name>.v` and returns the path.
    ///
    /// `dir` must already exist.
    pub fn write_to(&self, dir: &Path, name: &str) -> Result<PathBuf, RtlError> {
        let path = dir.join(format!("{name}.v"));
        std::fs::write(&path, &self.0).map_err(|source| RtlError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for RtlText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
