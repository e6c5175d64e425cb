//! Per-cell report for a selected subset of cells.
//!
//! Each selected cell prints a header with its placement, followed by an
//! XML-like block listing its type, bel, non-default properties, pin mappings
//! and the route traces of the nets it connects to:
//!
//! ```text
//! Cell: mem_reg RAMB36E1
//!   <<<Placed on: RAMB36_X0Y2/RAMB36E1>>>
//!
//!
//! <cell>
//!   <type>RAMB36E1</type>
//!   <bel>RAMB36E1</bel>
//!   ...
//! </cell>
//! ```

use std::fmt;

use strand_config::StrandConfig;
use strand_design::{Cell, CellDesign, NetId};
use strand_device::Device;

use crate::trace::{trace_net, TraceOptions};

/// Selects and shapes the cell report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReportOptions {
    /// Cells whose type starts with one of these prefixes are reported.
    pub cell_types: Vec<String>,
    /// Property keys starting with one of these prefixes are hidden.
    pub excluded_property_prefixes: Vec<String>,
    /// Print cell pin to bel pin mappings.
    pub pin_mappings: bool,
    /// Print the trace of every net the cell connects to.
    pub routes: bool,
    /// Options for those traces.
    pub trace: TraceOptions,
}

impl Default for CellReportOptions {
    fn default() -> Self {
        Self::from(&StrandConfig::default())
    }
}

impl From<&StrandConfig> for CellReportOptions {
    fn from(config: &StrandConfig) -> Self {
        Self {
            cell_types: config.report.cell_types.clone(),
            excluded_property_prefixes: config.report.excluded_property_prefixes.clone(),
            pin_mappings: config.report.pin_mappings,
            routes: config.report.routes,
            trace: TraceOptions::from(&config.trace),
        }
    }
}

impl CellReportOptions {
    /// Returns whether `cell` is covered by the report.
    pub fn selects(&self, cell: &Cell) -> bool {
        self.cell_types
            .iter()
            .any(|prefix| cell.cell_type().starts_with(prefix.as_str()))
    }

    fn shows_property(&self, key: &str) -> bool {
        !self
            .excluded_property_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix.as_str()))
    }
}

/// The report of one cell.
pub struct CellReport<'a> {
    device: &'a Device,
    design: &'a CellDesign,
    cell: &'a Cell,
    options: &'a CellReportOptions,
}

impl<'a> CellReport<'a> {
    /// Creates the report of `cell`.
    pub fn new(
        device: &'a Device,
        design: &'a CellDesign,
        cell: &'a Cell,
        options: &'a CellReportOptions,
    ) -> Self {
        Self {
            device,
            design,
            cell,
            options,
        }
    }

    /// Nets connected to the cell, in pin order, without repeats.
    fn connected_nets(&self) -> Vec<NetId> {
        let mut nets: Vec<NetId> = Vec::new();
        for pin in self.design.cell_pins(self.cell) {
            if let Some(net) = pin.net {
                if !nets.contains(&net) {
                    nets.push(net);
                }
            }
        }
        nets
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>, is_macro: bool) -> fmt::Result {
        let cell = self.cell;
        if is_macro {
            writeln!(f, "*Macro (Parent) Cell*")?;
            writeln!(f, "Cell: {} {}", cell.name, cell.lib_cell)?;
            return Ok(());
        }
        writeln!(f)?;
        if cell.is_internal {
            writeln!(f, "*Internal Cell*")?;
        }
        writeln!(f, "Cell: {} {}", cell.name, cell.lib_cell)?;
        match cell.placement {
            Some(bel) => writeln!(f, "  <<<Placed on: {}>>>", self.device.bel_name(bel)),
            None => writeln!(f, "  <<<Unplaced>>>"),
        }
    }

    fn fmt_properties(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lib_cell = self.design.lib_cell_of(self.cell);
        for prop in &self.cell.properties {
            if !self.options.shows_property(&prop.key) {
                continue;
            }
            let default = lib_cell.and_then(|lc| lc.default_value(&prop.key));
            if default == Some(prop.value.as_str()) {
                continue;
            }
            writeln!(f, "  <property>")?;
            writeln!(f, "    <key>{}</key>", prop.key)?;
            writeln!(f, "    <val>{}</val>", prop.value)?;
            writeln!(f, "  </property>")?;
        }
        Ok(())
    }

    fn fmt_pins(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pin in self.design.cell_pins(self.cell) {
            for &bel_pin in &pin.mapped_bel_pins {
                writeln!(f, "    <pin>")?;
                writeln!(f, "      <cellPin>{}</cellPin>", pin.name)?;
                writeln!(f, "      <belPin>{}</belPin>", self.device.bel_pin(bel_pin).name)?;
                writeln!(f, "    </pin>")?;
            }
        }
        Ok(())
    }

    fn fmt_routes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.connected_nets() {
            let net = self.design.net(id);
            if !net.is_routed() {
                continue;
            }
            writeln!(f, "  <route net=\"{}\">", net.name)?;
            match trace_net(self.device, net, &self.options.trace) {
                Ok(trace) => writeln!(f, "{}", trace.text)?,
                Err(e) => {
                    log::warn!("cell '{}': {e}", self.cell.name);
                    writeln!(f, "    <error>{e}</error>")?;
                }
            }
            writeln!(f, "  </route>")?;
        }
        Ok(())
    }
}

impl fmt::Display for CellReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_macro = self.design.is_macro(self.cell);
        self.fmt_header(f, is_macro)?;
        writeln!(f)?;
        writeln!(f)?;

        let Some(bel) = self.cell.placement else {
            return writeln!(f, "UNPLACED");
        };
        writeln!(f, "<cell> ")?;
        writeln!(f, "  <type>{}</type>", self.cell.cell_type())?;
        writeln!(f, "  <bel>{}</bel>", self.device.bel(bel).name)?;
        self.fmt_properties(f)?;
        if !is_macro && self.options.pin_mappings {
            self.fmt_pins(f)?;
        }
        if self.options.routes {
            self.fmt_routes(f)?;
        }
        writeln!(f, "</cell> ")
    }
}

/// The report of every selected cell of a design, in design order.
pub struct DesignReport<'a> {
    device: &'a Device,
    design: &'a CellDesign,
    options: &'a CellReportOptions,
}

impl<'a> DesignReport<'a> {
    /// Creates the report of `design`.
    pub fn new(device: &'a Device, design: &'a CellDesign, options: &'a CellReportOptions) -> Self {
        Self {
            device,
            design,
            options,
        }
    }

    /// Iterates over the cells the report covers.
    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> + '_ {
        self.design
            .cells
            .iter()
            .filter(|cell| self.options.selects(cell))
    }
}

impl fmt::Display for DesignReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells() {
            write!(
                f,
                "{}",
                CellReport::new(self.device, self.design, cell, self.options)
            )?;
        }
        Ok(())
    }
}
