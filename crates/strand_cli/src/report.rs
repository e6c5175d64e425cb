//! `strand report`: design summary followed by the selected cell reports.
//!
//! 1. Load config and merge the command-line overrides into it
//! 2. Load the checkpoint
//! 3. Print the summary, a blank line, then one report per selected cell

use strand_report::{CellReportOptions, DesignReport, DesignSummary};

use crate::{load, GlobalArgs, ReportArgs};

/// Runs the `strand report` command.
pub fn run(args: &ReportArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load::config(global)?;
    let options = merge_report_options(CellReportOptions::from(&config), args);

    let cp = load::checkpoint(&args.checkpoint, global)?;

    println!("{}", DesignSummary::of(&cp.design));
    println!();

    let report = DesignReport::new(&cp.device, &cp.design, &options);
    let selected = report.cells().count();
    if selected == 0 && !global.quiet {
        eprintln!(
            "warning: no cells match {}",
            options.cell_types.join(", ")
        );
    }
    print!("{report}");

    if !global.quiet {
        eprintln!("   Reported {selected} cell(s)");
    }
    Ok(0)
}

/// Applies command-line overrides on top of the configured options.
fn merge_report_options(mut options: CellReportOptions, args: &ReportArgs) -> CellReportOptions {
    if !args.cell_types.is_empty() {
        options.cell_types = args.cell_types.clone();
    }
    if args.no_pin_mappings {
        options.pin_mappings = false;
    }
    if args.no_routes {
        options.routes = false;
    }
    options
}
