//! Lists which bels the library cells of a design can be placed on.

use std::collections::HashSet;
use std::fmt;

use strand_design::{Cell, CellDesign};

/// The cell/bel mapping listing, one entry per distinct library cell.
pub struct CellBelMappings<'a> {
    design: &'a CellDesign,
    limit: usize,
}

impl<'a> CellBelMappings<'a> {
    /// Lists at most `limit` distinct library cells of `design`.
    pub fn new(design: &'a CellDesign, limit: usize) -> Self {
        Self { design, limit }
    }

    /// The first cell of each distinct library cell, in design order.
    pub fn representatives(&self) -> Vec<&'a Cell> {
        let mut seen = HashSet::new();
        self.design
            .cells
            .iter()
            .filter(|cell| seen.insert(cell.lib_cell.as_str()))
            .take(self.limit)
            .collect()
    }
}

impl fmt::Display for CellBelMappings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Some Cell/Bel Mappings:")?;
        for (i, cell) in self.representatives().into_iter().enumerate() {
            writeln!(f, "  Cell #{} = {} {}", i + 1, cell.name, cell.lib_cell)?;
            let Some(lib_cell) = self.design.lib_cell_of(cell) else {
                writeln!(f, "    This cell cannot be placed.")?;
                continue;
            };
            if lib_cell.is_macro {
                writeln!(f, "    Cell is macro")?;
                continue;
            }
            if lib_cell.anchors.is_empty() {
                writeln!(f, "    This cell cannot be placed.")?;
            }
            for anchor in &lib_cell.anchors {
                writeln!(
                    f,
                    "    Can be placed onto sites of type {} on Bels of type {}",
                    anchor.site_type, anchor.bel_type
                )?;
            }
        }
        Ok(())
    }
}
