//! `strand trace`: the physical route of one net.

use strand_report::{trace_net, TraceOptions};

use crate::{load, GlobalArgs, TraceArgs};

/// Runs the `strand trace` command.
///
/// Returns exit code 1 when the net does not exist.
pub fn run(args: &TraceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load::config(global)?;
    let cp = load::checkpoint(&args.checkpoint, global)?;

    let Some(net) = cp.design.net_by_name(&args.net) else {
        eprintln!("error: no net named '{}' in {}", args.net, cp.design.name);
        return Ok(1);
    };
    if !net.is_routed() && !global.quiet {
        eprintln!("warning: net '{}' is not routed", net.name);
    }

    let trace = trace_net(&cp.device, net, &TraceOptions::from(&config.trace))?;
    println!("{}", trace.text);

    if global.verbose {
        eprintln!(
            "   {} segment(s) deep, {} fork(s)",
            trace.depth, trace.branches
        );
    }
    Ok(0)
}
