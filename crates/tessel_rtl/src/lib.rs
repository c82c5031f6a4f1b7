//! Verilog generation from expanded netlists.
//!
//! [`generate`] renders an [`ExpandedNetlist`](tessel_netlist::ExpandedNetlist)
//! as a single Verilog module: one instantiation per instance and one `wire`
//! per net, typed from the module library. The result is an [`RtlText`]
//! which can be written to `<name>.v` in an output directory.

#![warn(missing_docs)]

pub mod codes;
pub mod emit;
pub mod error;
pub mod output;

pub use emit::{generate, EmitOptions, HEADER};
pub use error::RtlError;
pub use output::RtlText;
