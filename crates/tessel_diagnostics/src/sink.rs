//! Diagnostic accumulator shared by the pipeline stages of one run.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard};

/// Collects the diagnostics of one netlist as it moves through load,
/// expansion and emission.
///
/// Stages take `&DiagnosticSink`, so one sink can be threaded through every
/// stage without a mutable borrow. Each emitted diagnostic is also traced
/// through `log` at debug level.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        log::debug!(
            "{}[{}] {}: {}",
            diag.severity,
            diag.code,
            diag.subject.as_deref().unwrap_or("-"),
            diag.message
        );
        self.lock().push(diag);
    }

    /// Returns the number of diagnostics held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns how many held diagnostics have the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|d| d.severity == severity).count()
    }

    /// Returns `true` if any error-severity diagnostic is held.
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|d| d.severity == Severity::Error)
    }

    /// Returns the number of warning-severity diagnostics held.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns the diagnostics carrying `code`, in emission order.
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.code == code)
            .cloned()
            .collect()
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
    const W403: DiagnosticCode = DiagnosticCode::new(Category::Warning, 403);

    #[test]
    fn new_sink_is_empty() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn counts_by_severity() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(W301, "instance `ghost` not found"));
        sink.emit(Diagnostic::warning(W403, "net `floating` is empty"));
        sink.emit(Diagnostic::note(
            DiagnosticCode::new(Category::Note, 1),
            "2 nets merged",
        ));
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.warning_count(), 2);
        assert_eq!(sink.count(Severity::Note), 1);
        assert!(!sink.has_errors());

        sink.emit(Diagnostic::error(
            DiagnosticCode::new(Category::Error, 1),
            "no instances",
        ));
        assert!(sink.has_errors());
    }

    #[test]
    fn filter_by_code_keeps_order() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(W301, "a").with_subject("bus.g.a"));
        sink.emit(Diagnostic::warning(W403, "b"));
        sink.emit(Diagnostic::warning(W301, "c"));
        let found: Vec<_> = sink.with_code(W301).into_iter().map(|d| d.message).collect();
        assert_eq!(found, vec!["a", "c"]);
    }

    #[test]
    fn take_all_drains() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(W301, "a"));
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.is_empty());
    }
}
