//! Read-only design model for Strand.
//!
//! A [`CellDesign`] is a placed-and-routed netlist: cells placed on bels,
//! cell pins mapped onto bel pins, and nets whose physical routing is split
//! into [`RouteTree`]s by domain (inside a site or in the general routing
//! fabric). Designs are loaded from a [`Checkpoint`] and validated against the
//! device slice they refer to.
//!
//! # Usage
//!
//! ```ignore
//! use strand_design::load_checkpoint;
//!
//! let cp = load_checkpoint(Path::new("top.json.gz"))?;
//! println!("{} of {} nets routed", cp.design.routed_count(), cp.design.net_count());
//! ```

#![warn(missing_docs)]

pub mod checkpoint;
pub mod data;
pub mod ids;
pub mod route_tree;
pub mod validate;

pub use checkpoint::{
    load_checkpoint, load_checkpoint_from_reader, load_checkpoint_from_str, Checkpoint,
    CheckpointError,
};
pub use data::{
    BelAnchor, Cell, CellDesign, CellPin, LibraryCell, Net, NetRouting, NetType, Property,
    SinkTree,
};
pub use ids::{CellId, NetId, PinId, RouteNodeId};
pub use route_tree::{Connection, RouteNode, RouteTree};
