//! Shared foundational types used across the Tessel SoC assembly tools.
//!
//! This crate provides the [`NamePattern`] matcher used to select libraries
//! and entries by name, and serde helpers for the name-keyed sections of
//! library and netlist documents.

#![warn(missing_docs)]

pub mod de;
pub mod pattern;

pub use de::null_as_empty;
pub use pattern::{NamePattern, PatternError};
