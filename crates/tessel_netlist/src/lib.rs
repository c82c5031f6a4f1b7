//! Netlist documents and bus expansion.
//!
//! A netlist describes module instances, point-to-point nets and abstract
//! bus groups. [`load_netlist`] reads the YAML document into a
//! [`RawNetlist`]; [`expand`] rewrites every bus group into signal-level nets
//! using the bus and module libraries and returns an [`ExpandedNetlist`],
//! which is what the RTL emitter consumes.

#![warn(missing_docs)]

pub mod codes;
pub mod document;
pub mod error;
pub mod expand;
pub mod loader;
pub mod port;

pub use document::{
    BusGroup, BusMember, Endpoint, ExpandedNetlist, Instance, Net, Parameters, RawNetlist, Record,
};
pub use error::NetlistError;
pub use expand::{expand, ExpandOptions};
pub use loader::{load_netlist, load_netlist_from_str};
pub use port::{port_candidates, resolve_bus_port, ResolvedBusPort};
