//! Core design data structures.
//!
//! Defines the placed-and-routed cell design: library cells, cells (with
//! optional bel placement and properties), cell pins (with their bel pin
//! mappings), and nets (with their physical routing). The [`CellDesign`] is
//! loaded once from a checkpoint and only read afterwards.

use crate::ids::{CellId, NetId, PinId};
use crate::route_tree::RouteTree;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use strand_device::{BelPinRef, BelRef, PinDirection, SitePinRef};

/// A placed-and-routed design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDesign {
    /// The design name.
    pub name: String,
    /// The part the design targets.
    pub part: String,
    /// All library cells used by the design.
    #[serde(default)]
    pub lib_cells: Vec<LibraryCell>,
    /// All cells in the design.
    #[serde(default)]
    pub cells: Vec<Cell>,
    /// All cell pins in the design.
    #[serde(default)]
    pub pins: Vec<CellPin>,
    /// All nets in the design.
    #[serde(default)]
    pub nets: Vec<Net>,
    /// Auxiliary index: cell name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub cell_by_name: HashMap<String, CellId>,
    /// Auxiliary index: net name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub net_by_name: HashMap<String, NetId>,
    /// Auxiliary index: library cell name to position in `lib_cells`.
    #[serde(skip)]
    pub lib_cell_by_name: HashMap<String, usize>,
}

impl CellDesign {
    /// Creates an empty design targeting `part`.
    pub fn new(name: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part: part.into(),
            lib_cells: Vec::new(),
            cells: Vec::new(),
            pins: Vec::new(),
            nets: Vec::new(),
            cell_by_name: HashMap::new(),
            net_by_name: HashMap::new(),
            lib_cell_by_name: HashMap::new(),
        }
    }

    /// Registers a library cell.
    pub fn add_lib_cell(&mut self, lib_cell: LibraryCell) {
        self.lib_cell_by_name
            .insert(lib_cell.name.clone(), self.lib_cells.len());
        self.lib_cells.push(lib_cell);
    }

    /// Adds a cell and returns its ID.
    pub fn add_cell(&mut self, mut cell: Cell) -> CellId {
        let id = CellId::from_raw(self.cells.len() as u32);
        cell.id = id;
        self.cell_by_name.insert(cell.name.clone(), id);
        self.cells.push(cell);
        id
    }

    /// Adds a pin, attaches it to its cell, and returns its ID.
    pub fn add_pin(&mut self, mut pin: CellPin) -> PinId {
        let id = PinId::from_raw(self.pins.len() as u32);
        pin.id = id;
        self.cells[pin.cell.index()].pins.push(id);
        self.pins.push(pin);
        id
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, mut net: Net) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        net.id = id;
        self.net_by_name.insert(net.name.clone(), id);
        self.nets.push(net);
        id
    }

    /// Connects a pin to a net as its source (output pins) or as a sink.
    pub fn connect(&mut self, pin: PinId, net: NetId) {
        let cell_pin = &mut self.pins[pin.index()];
        cell_pin.net = Some(net);
        let net = &mut self.nets[net.index()];
        match cell_pin.direction {
            PinDirection::Output if net.source.is_none() => net.source = Some(pin),
            _ => net.sinks.push(pin),
        }
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Returns the pin with the given ID.
    pub fn pin(&self, id: PinId) -> &CellPin {
        &self.pins[id.index()]
    }

    /// Looks up a cell by name.
    pub fn cell_by_name(&self, name: &str) -> Option<&Cell> {
        self.cell_by_name.get(name).map(|&id| self.cell(id))
    }

    /// Looks up a net by name.
    pub fn net_by_name(&self, name: &str) -> Option<&Net> {
        self.net_by_name.get(name).map(|&id| self.net(id))
    }

    /// Returns the library cell a cell is an instance of.
    pub fn lib_cell(&self, name: &str) -> Option<&LibraryCell> {
        self.lib_cell_by_name
            .get(name)
            .map(|&idx| &self.lib_cells[idx])
    }

    /// Returns the library cell of `cell`.
    pub fn lib_cell_of(&self, cell: &Cell) -> Option<&LibraryCell> {
        self.lib_cell(&cell.lib_cell)
    }

    /// Returns whether `cell` is a macro (parent) cell.
    pub fn is_macro(&self, cell: &Cell) -> bool {
        self.lib_cell_of(cell).is_some_and(|lc| lc.is_macro)
    }

    /// Iterates over the pins of a cell.
    pub fn cell_pins<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a CellPin> + 'a {
        cell.pins.iter().map(move |&id| self.pin(id))
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the number of placed cells.
    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_placed()).count()
    }

    /// Returns the number of routed nets.
    pub fn routed_count(&self) -> usize {
        self.nets.iter().filter(|n| n.is_routed()).count()
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.cell_by_name.clear();
        for (i, cell) in self.cells.iter().enumerate() {
            self.cell_by_name
                .insert(cell.name.clone(), CellId::from_raw(i as u32));
        }
        self.net_by_name.clear();
        for (i, net) in self.nets.iter().enumerate() {
            self.net_by_name
                .insert(net.name.clone(), NetId::from_raw(i as u32));
        }
        self.lib_cell_by_name.clear();
        for (i, lib_cell) in self.lib_cells.iter().enumerate() {
            self.lib_cell_by_name.insert(lib_cell.name.clone(), i);
        }
    }
}

/// A bel type a library cell can be anchored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BelAnchor {
    /// The site type hosting the bel (e.g., "RAMB36E1").
    pub site_type: String,
    /// The bel type name (e.g., "RAMB36E1").
    pub bel_type: String,
}

/// A primitive or macro definition that cells instantiate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryCell {
    /// The library cell name, which is also the type of its instances.
    pub name: String,
    /// Whether this is a macro made of internal cells.
    #[serde(default)]
    pub is_macro: bool,
    /// Default property values.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Bel types instances can be placed on.
    #[serde(default)]
    pub anchors: Vec<BelAnchor>,
}

impl LibraryCell {
    /// Creates a primitive library cell with no defaults or anchors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_macro: false,
            defaults: BTreeMap::new(),
            anchors: Vec::new(),
        }
    }

    /// Returns the default value of a property, if the library defines one.
    pub fn default_value(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }
}

/// A key/value property attached to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// The property name (e.g., "READ_WIDTH_A").
    pub key: String,
    /// The property value as written in the checkpoint.
    pub value: String,
}

impl Property {
    /// Creates a property.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A cell (primitive or macro instance) in the design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// The unique ID of this cell, equal to its position in the design.
    pub id: CellId,
    /// Hierarchical cell name.
    pub name: String,
    /// The library cell this cell instantiates.
    pub lib_cell: String,
    /// The bel this cell is placed on (`None` = unplaced).
    #[serde(default)]
    pub placement: Option<BelRef>,
    /// Properties set on this cell.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// The pins of this cell.
    #[serde(default)]
    pub pins: Vec<PinId>,
    /// Whether this cell is internal to a macro.
    #[serde(default)]
    pub is_internal: bool,
    /// The macro cell containing this internal cell.
    #[serde(default)]
    pub parent: Option<CellId>,
}

fn unassigned_cell() -> CellId {
    CellId::from_raw(u32::MAX)
}

impl Cell {
    /// Creates an unplaced cell with no properties or pins.
    pub fn new(name: impl Into<String>, lib_cell: impl Into<String>) -> Self {
        Self {
            id: unassigned_cell(),
            name: name.into(),
            lib_cell: lib_cell.into(),
            placement: None,
            properties: Vec::new(),
            pins: Vec::new(),
            is_internal: false,
            parent: None,
        }
    }

    /// Returns the cell type, i.e. the name of its library cell.
    pub fn cell_type(&self) -> &str {
        &self.lib_cell
    }

    /// Returns whether the cell is placed on a bel.
    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }
}

/// A pin on a cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellPin {
    /// The unique ID of this pin, equal to its position in the design.
    pub id: PinId,
    /// The pin name (e.g., "CLKARDCLK", "DOADO[0]").
    pub name: String,
    /// Direction of the pin relative to the cell.
    pub direction: PinDirection,
    /// The cell that owns this pin.
    pub cell: CellId,
    /// The net this pin is connected to (`None` = unconnected).
    #[serde(default)]
    pub net: Option<NetId>,
    /// The bel pins this cell pin is mapped onto after placement.
    #[serde(default)]
    pub mapped_bel_pins: Vec<BelPinRef>,
}

fn unassigned_pin() -> PinId {
    PinId::from_raw(u32::MAX)
}

impl CellPin {
    /// Creates an unconnected pin on `cell`.
    pub fn new(name: impl Into<String>, direction: PinDirection, cell: CellId) -> Self {
        Self {
            id: unassigned_pin(),
            name: name.into(),
            direction,
            cell,
            net: None,
            mapped_bel_pins: Vec::new(),
        }
    }
}

/// The kind of signal a net carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetType {
    /// A regular signal net.
    #[default]
    Wire,
    /// The constant-one net.
    Vcc,
    /// The constant-zero net.
    Gnd,
}

/// The intra-site route tree entered through a site pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkTree {
    /// The site pin the route enters through.
    pub site_pin: SitePinRef,
    /// The route inside the site.
    pub tree: RouteTree,
}

/// The physical routing of a net, split by routing domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetRouting {
    /// The intra-site route from the source bel pin, if the source is in a site.
    #[serde(default)]
    pub source_tree: Option<RouteTree>,
    /// The routes through the general routing fabric, one per site-to-site segment.
    #[serde(default)]
    pub intersite: Vec<RouteTree>,
    /// The intra-site routes entered through sink site pins.
    #[serde(default)]
    pub sink_trees: Vec<SinkTree>,
}

/// A net connecting a source pin to sink pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net, equal to its position in the design.
    pub id: NetId,
    /// The net name.
    pub name: String,
    /// The kind of signal carried.
    #[serde(default)]
    pub net_type: NetType,
    /// The driving pin.
    #[serde(default)]
    pub source: Option<PinId>,
    /// The driven pins.
    #[serde(default)]
    pub sinks: Vec<PinId>,
    /// The physical routing (`None` = unrouted).
    #[serde(default)]
    pub routing: Option<NetRouting>,
}

fn unassigned_net() -> NetId {
    NetId::from_raw(u32::MAX)
}

impl Net {
    /// Creates an unrouted signal net.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: unassigned_net(),
            name: name.into(),
            net_type: NetType::Wire,
            source: None,
            sinks: Vec::new(),
            routing: None,
        }
    }

    /// Returns whether the net has physical routing.
    pub fn is_routed(&self) -> bool {
        self.routing.is_some()
    }

    /// Returns whether this is a VCC or GND net.
    pub fn is_static(&self) -> bool {
        self.net_type != NetType::Wire
    }

    /// Returns the intra-site tree leaving the source bel pin.
    pub fn source_tree(&self) -> Option<&RouteTree> {
        self.routing.as_ref()?.source_tree.as_ref()
    }

    /// Returns the inter-site route trees (empty when unrouted).
    pub fn intersite_trees(&self) -> &[RouteTree] {
        match &self.routing {
            Some(routing) => &routing.intersite,
            None => &[],
        }
    }

    /// Returns the intra-site trees entered through sink site pins.
    pub fn sink_trees(&self) -> &[SinkTree] {
        match &self.routing {
            Some(routing) => &routing.sink_trees,
            None => &[],
        }
    }

    /// Returns the position in [`Net::sink_trees`] of the first tree entered
    /// through `site_pin`.
    pub fn sink_tree_position(&self, site_pin: SitePinRef) -> Option<usize> {
        self.sink_trees()
            .iter()
            .position(|st| st.site_pin == site_pin)
    }
}
