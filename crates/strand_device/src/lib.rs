//! Read-only FPGA device model for Strand.
//!
//! A [`Device`] holds the slice of device geometry a placed-and-routed design
//! refers to: tiles, the sites inside them, the bels and boundary pins of each
//! site, and every wire a route can occupy. Wires are owned either by a tile
//! (general routing fabric) or by a site (intra-site wiring), which determines
//! how their full names print.

#![warn(missing_docs)]

pub mod device;
pub mod ids;
pub mod types;

pub use device::Device;
pub use ids::{SiteId, TileId, WireId};
pub use types::{
    Bel, BelPin, BelPinRef, BelRef, PinDirection, Site, SitePin, SitePinRef, Tile, Wire, WireOwner,
};
