//! Structured warnings and errors for netlist processing.
//!
//! Every per-item problem found while expanding or emitting a netlist is
//! reported as a [`Diagnostic`] with a severity, a [`DiagnosticCode`] and the
//! path of the offending document item. The [`DiagnosticSink`] accumulates
//! them during a run, and [`DiagnosticRenderer`] implementations format them
//! for the terminal.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
