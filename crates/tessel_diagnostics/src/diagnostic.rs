//! Structured diagnostic messages with severity, code, subject and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message about one netlist or library item.
///
/// The `subject` is a dotted path into the document that names the item the
/// diagnostic is about, e.g. `bus.sysbus.cpu0` or `net.sysbus_addr`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Path of the document item the diagnostic refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Explanatory footnotes (e.g., "note: ...").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message.into())
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message.into())
    }

    /// Creates a new informational diagnostic.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message.into())
    }

    /// Sets the document path this diagnostic refers to.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Warning, 301);
        let diag = Diagnostic::warning(code, "instance `u0` not found");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "instance `u0` not found");
        assert!(diag.subject.is_none());
        assert_eq!(diag.code.to_string(), "W301");
    }

    #[test]
    fn create_error_and_note() {
        let e = Diagnostic::error(DiagnosticCode::new(Category::Error, 1), "boom");
        assert_eq!(e.severity, Severity::Error);
        let n = Diagnostic::note(DiagnosticCode::new(Category::Note, 1), "fyi");
        assert_eq!(n.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Warning, 305);
        let diag = Diagnostic::warning(code, "bus type mismatch")
            .with_subject("bus.sysbus.uart0")
            .with_note("group type was fixed by `cpu0`")
            .with_help("connect the port to a separate bus group");
        assert_eq!(diag.subject.as_deref(), Some("bus.sysbus.uart0"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn json_report_shape() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 403), "empty net")
            .with_subject("net.floating");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "severity": "warning",
                "code": "W403",
                "message": "empty net",
                "subject": "net.floating",
            })
        );
        let back: Diagnostic = serde_json::from_value(json).unwrap();
        assert!(back.notes.is_empty());
    }
}
