//! Structural elements of an FPGA device slice.
//!
//! A device is a grid of [`Tile`]s. Tiles contain [`Site`]s, sites contain
//! [`Bel`]s and expose [`SitePin`]s at their boundary. Every physical wire,
//! whether in the general routing fabric or inside a site, is a [`Wire`].

use crate::ids::{SiteId, TileId, WireId};
use serde::{Deserialize, Serialize};

/// Direction of a site pin or bel pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    /// Signal flows into the site or bel.
    Input,
    /// Signal flows out of the site or bel.
    Output,
    /// Bidirectional pin.
    Inout,
}

/// A single tile in the device grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// The unique ID of this tile.
    pub id: TileId,
    /// The tile instance name (e.g., "BRAM_L_X6Y0", "INT_L_X6Y4").
    pub name: String,
    /// The tile type name (e.g., "BRAM_L").
    pub tile_type: String,
    /// Column index in the device grid.
    #[serde(default)]
    pub col: u32,
    /// Row index in the device grid.
    #[serde(default)]
    pub row: u32,
}

/// A site (placement cluster) within a tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// The unique ID of this site.
    pub id: SiteId,
    /// The site instance name (e.g., "RAMB36_X0Y0").
    pub name: String,
    /// The site type name (e.g., "RAMB36E1", "SLICEL").
    pub site_type: String,
    /// The tile containing this site.
    pub tile: TileId,
    /// The bels contained in this site, addressed by index.
    #[serde(default)]
    pub bels: Vec<Bel>,
    /// The boundary pins of this site, addressed by index.
    #[serde(default)]
    pub pins: Vec<SitePin>,
}

/// A basic element (placement primitive) inside a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bel {
    /// The bel name within its site (e.g., "RAMB36E1", "AFF").
    pub name: String,
    /// The bel type name.
    pub bel_type: String,
    /// The pins of this bel, addressed by index.
    #[serde(default)]
    pub pins: Vec<BelPin>,
}

/// A terminal pin on a bel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BelPin {
    /// The pin name (e.g., "CLKARDCLKL").
    pub name: String,
    /// Direction relative to the bel.
    pub direction: PinDirection,
    /// The intra-site wire this pin attaches to.
    pub wire: WireId,
}

/// A boundary port between a site's internal wiring and the routing fabric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePin {
    /// The pin name (e.g., "CLKARDCLKL", "AMUX").
    pub name: String,
    /// Direction relative to the site.
    pub direction: PinDirection,
    /// The wire on the inside of the site.
    pub internal_wire: WireId,
    /// The corresponding wire in the general routing fabric.
    pub external_wire: WireId,
}

/// The element a wire belongs to, which also provides its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireOwner {
    /// An inter-site wire belonging to a tile.
    Tile(TileId),
    /// An intra-site wire belonging to a site.
    Site(SiteId),
}

/// A physical wire segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// The unique ID of this wire.
    pub id: WireId,
    /// The tile or site owning this wire.
    pub owner: WireOwner,
    /// The short wire name, unique within its owner (e.g., "LOGIC_OUTS4").
    pub name: String,
}

/// Reference to a site pin by site and pin index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SitePinRef {
    /// The site exposing the pin.
    pub site: SiteId,
    /// Index into [`Site::pins`].
    pub pin: u32,
}

/// Reference to a bel by site and bel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BelRef {
    /// The site containing the bel.
    pub site: SiteId,
    /// Index into [`Site::bels`].
    pub bel: u32,
}

/// Reference to a bel pin by site, bel index and pin index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BelPinRef {
    /// The site containing the bel.
    pub site: SiteId,
    /// Index into [`Site::bels`].
    pub bel: u32,
    /// Index into [`Bel::pins`].
    pub pin: u32,
}

impl BelPinRef {
    /// Returns the bel this pin belongs to.
    pub fn bel_ref(self) -> BelRef {
        BelRef {
            site: self.site,
            bel: self.bel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_direction_serializes_lowercase() {
        let json = serde_json::to_string(&PinDirection::Output).unwrap();
        assert_eq!(json, "\"output\"");
    }

    #[test]
    fn wire_owner_tagged() {
        let owner: WireOwner = serde_json::from_str(r#"{"site": 3}"#).unwrap();
        assert_eq!(owner, WireOwner::Site(SiteId::from_raw(3)));
        let owner: WireOwner = serde_json::from_str(r#"{"tile": 1}"#).unwrap();
        assert_eq!(owner, WireOwner::Tile(TileId::from_raw(1)));
    }

    #[test]
    fn bel_pin_ref_to_bel_ref() {
        let pin = BelPinRef {
            site: SiteId::from_raw(2),
            bel: 1,
            pin: 5,
        };
        assert_eq!(
            pin.bel_ref(),
            BelRef {
                site: SiteId::from_raw(2),
                bel: 1
            }
        );
    }

    #[test]
    fn site_defaults_empty_lists() {
        let site: Site = serde_json::from_str(
            r#"{"id": 0, "name": "SLICE_X0Y0", "site_type": "SLICEL", "tile": 0}"#,
        )
        .unwrap();
        assert!(site.bels.is_empty());
        assert!(site.pins.is_empty());
    }
}
