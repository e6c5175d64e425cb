//! Whole-design placement and routing counts.

use std::fmt;

use strand_design::CellDesign;

/// Cell and net counts of a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignSummary {
    /// Total number of cells.
    pub cells: usize,
    /// Number of cells placed on a bel.
    pub placed: usize,
    /// Total number of nets.
    pub nets: usize,
    /// Number of nets with physical routing.
    pub routed: usize,
}

impl DesignSummary {
    /// Counts the cells and nets of `design`.
    pub fn of(design: &CellDesign) -> Self {
        Self {
            cells: design.cell_count(),
            placed: design.placed_count(),
            nets: design.net_count(),
            routed: design.routed_count(),
        }
    }
}

impl fmt::Display for DesignSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Design Summary:")?;
        writeln!(
            f,
            "The design has: {} cells, {} of them are placed.",
            self.cells, self.placed
        )?;
        write!(
            f,
            "The design has: {} nets, {} of them are routed.",
            self.nets, self.routed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn counts_fixture_design() {
        let fx = fixtures::slice_to_bram();
        let design = fixtures::bram_design(&fx);
        let summary = DesignSummary::of(&design);
        assert_eq!(
            summary,
            DesignSummary {
                cells: 4,
                placed: 1,
                nets: 2,
                routed: 1,
            }
        );
    }

    #[test]
    fn renders_three_lines() {
        let summary = DesignSummary {
            cells: 12,
            placed: 10,
            nets: 7,
            routed: 0,
        };
        assert_eq!(
            summary.to_string(),
            "Design Summary:\n\
             The design has: 12 cells, 10 of them are placed.\n\
             The design has: 7 nets, 0 of them are routed."
        );
    }

    #[test]
    fn empty_design() {
        let design = CellDesign::new("empty", "xc7a100tcsg324");
        let summary = DesignSummary::of(&design);
        assert_eq!(summary.cells, 0);
        assert_eq!(summary.routed, 0);
    }
}
