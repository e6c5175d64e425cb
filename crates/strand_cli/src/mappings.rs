//! `strand mappings`: bels each library cell can be placed on.

use strand_report::CellBelMappings;

use crate::{load, GlobalArgs, MappingsArgs};

/// Runs the `strand mappings` command.
pub fn run(args: &MappingsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load::config(global)?;
    let limit = args.limit.unwrap_or(config.mappings.limit);
    let cp = load::checkpoint(&args.checkpoint, global)?;

    print!("{}", CellBelMappings::new(&cp.design, limit));
    Ok(0)
}
