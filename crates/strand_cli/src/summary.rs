//! `strand summary`: cell and net counts.

use strand_report::DesignSummary;

use crate::{load, GlobalArgs, SummaryArgs};

/// Runs the `strand summary` command.
pub fn run(args: &SummaryArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cp = load::checkpoint(&args.checkpoint, global)?;
    println!("{}", DesignSummary::of(&cp.design));
    Ok(0)
}
