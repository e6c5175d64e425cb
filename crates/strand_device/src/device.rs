//! The device slice referenced by a design checkpoint.

use crate::ids::{SiteId, TileId, WireId};
use crate::types::{Bel, BelPin, BelPinRef, BelRef, Site, SitePin, SitePinRef, Tile, Wire, WireOwner};
use serde::{Deserialize, Serialize};

/// The tiles, sites and wires of a device that a design refers to.
///
/// Tables are indexed by the raw value of their ID types. Plain accessors
/// index the tables directly and panic on an unknown ID; the `get_*` variants return
/// `None` instead and are used when validating untrusted references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// The part name (e.g., "xc7a100tcsg324").
    pub part: String,
    /// The device family (e.g., "artix7").
    #[serde(default)]
    pub family: String,
    /// All tiles of the slice.
    #[serde(default)]
    pub tiles: Vec<Tile>,
    /// All sites of the slice.
    #[serde(default)]
    pub sites: Vec<Site>,
    /// All wires of the slice.
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl Device {
    /// Creates an empty device slice.
    pub fn new(part: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            family: family.into(),
            tiles: Vec::new(),
            sites: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Adds a tile and returns its ID.
    pub fn add_tile(&mut self, name: impl Into<String>, tile_type: impl Into<String>) -> TileId {
        let id = TileId::from_raw(self.tiles.len() as u32);
        self.tiles.push(Tile {
            id,
            name: name.into(),
            tile_type: tile_type.into(),
            col: 0,
            row: 0,
        });
        id
    }

    /// Adds an empty site to a tile and returns its ID.
    pub fn add_site(
        &mut self,
        name: impl Into<String>,
        site_type: impl Into<String>,
        tile: TileId,
    ) -> SiteId {
        let id = SiteId::from_raw(self.sites.len() as u32);
        self.sites.push(Site {
            id,
            name: name.into(),
            site_type: site_type.into(),
            tile,
            bels: Vec::new(),
            pins: Vec::new(),
        });
        id
    }

    /// Adds a wire and returns its ID.
    pub fn add_wire(&mut self, owner: WireOwner, name: impl Into<String>) -> WireId {
        let id = WireId::from_raw(self.wires.len() as u32);
        self.wires.push(Wire {
            id,
            owner,
            name: name.into(),
        });
        id
    }

    /// Adds a pin to a site and returns a reference to it.
    pub fn add_site_pin(&mut self, site: SiteId, pin: SitePin) -> SitePinRef {
        let pins = &mut self.sites[site.index()].pins;
        pins.push(pin);
        SitePinRef {
            site,
            pin: (pins.len() - 1) as u32,
        }
    }

    /// Adds a bel to a site and returns a reference to it.
    pub fn add_bel(&mut self, site: SiteId, bel: Bel) -> BelRef {
        let bels = &mut self.sites[site.index()].bels;
        bels.push(bel);
        BelRef {
            site,
            bel: (bels.len() - 1) as u32,
        }
    }

    /// Adds a pin to an existing bel and returns a reference to it.
    pub fn add_bel_pin(&mut self, bel: BelRef, pin: BelPin) -> BelPinRef {
        let pins = &mut self.sites[bel.site.index()].bels[bel.bel as usize].pins;
        pins.push(pin);
        BelPinRef {
            site: bel.site,
            bel: bel.bel,
            pin: (pins.len() - 1) as u32,
        }
    }

    /// Returns the tile with the given ID.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Returns the site with the given ID.
    pub fn site(&self, id: SiteId) -> &Site {
        &self.sites[id.index()]
    }

    /// Returns the wire with the given ID.
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.index()]
    }

    /// Returns the site pin behind a reference.
    pub fn site_pin(&self, pin: SitePinRef) -> &SitePin {
        &self.site(pin.site).pins[pin.pin as usize]
    }

    /// Returns the bel behind a reference.
    pub fn bel(&self, bel: BelRef) -> &Bel {
        &self.site(bel.site).bels[bel.bel as usize]
    }

    /// Returns the bel pin behind a reference.
    pub fn bel_pin(&self, pin: BelPinRef) -> &BelPin {
        &self.bel(pin.bel_ref()).pins[pin.pin as usize]
    }

    /// Returns the wire with the given ID, if it exists.
    pub fn get_wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id.index())
    }

    /// Returns the site pin behind a reference, if it exists.
    pub fn get_site_pin(&self, pin: SitePinRef) -> Option<&SitePin> {
        self.sites.get(pin.site.index())?.pins.get(pin.pin as usize)
    }

    /// Returns the bel behind a reference, if it exists.
    pub fn get_bel(&self, bel: BelRef) -> Option<&Bel> {
        self.sites.get(bel.site.index())?.bels.get(bel.bel as usize)
    }

    /// Returns the bel pin behind a reference, if it exists.
    pub fn get_bel_pin(&self, pin: BelPinRef) -> Option<&BelPin> {
        self.get_bel(pin.bel_ref())?.pins.get(pin.pin as usize)
    }

    /// Returns the name of a wire's owning tile or site.
    pub fn owner_name(&self, owner: WireOwner) -> &str {
        match owner {
            WireOwner::Tile(tile) => &self.tile(tile).name,
            WireOwner::Site(site) => &self.site(site).name,
        }
    }

    /// Returns the short name of a wire.
    pub fn wire_name(&self, id: WireId) -> &str {
        &self.wire(id).name
    }

    /// Returns the full name of a wire in `owner/wire` form.
    pub fn wire_full_name(&self, id: WireId) -> String {
        let wire = self.wire(id);
        format!("{}/{}", self.owner_name(wire.owner), wire.name)
    }

    /// Returns the display name of a site pin in `site.pin` form.
    pub fn site_pin_name(&self, pin: SitePinRef) -> String {
        format!("{}.{}", self.site(pin.site).name, self.site_pin(pin).name)
    }

    /// Returns the display name of a bel in `site/bel` form.
    pub fn bel_name(&self, bel: BelRef) -> String {
        format!("{}/{}", self.site(bel.site).name, self.bel(bel).name)
    }

    /// Returns the display name of a bel pin in `site/bel.pin` form.
    pub fn bel_pin_name(&self, pin: BelPinRef) -> String {
        format!("{}.{}", self.bel_name(pin.bel_ref()), self.bel_pin(pin).name)
    }
}
