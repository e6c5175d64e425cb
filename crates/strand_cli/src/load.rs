//! Shared checkpoint and configuration loading for all subcommands.

use std::path::Path;

use strand_config::StrandConfig;
use strand_design::Checkpoint;

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, else `strand.toml` in the
/// working directory, else the defaults.
pub fn config(global: &GlobalArgs) -> Result<StrandConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let explicit = global.config.as_deref().map(Path::new);
    let config = strand_config::resolve_config(explicit, &cwd)?;
    Ok(config)
}

/// Loads a checkpoint, printing status lines unless quiet.
pub fn checkpoint(path: &str, global: &GlobalArgs) -> Result<Checkpoint, Box<dyn std::error::Error>> {
    if !global.quiet {
        eprintln!("   Loading {path}");
    }
    let cp = strand_design::load_checkpoint(Path::new(path))?;
    if global.verbose {
        eprintln!(
            "   Loaded design '{}' for {} ({} cells, {} nets)",
            cp.design.name,
            cp.device.part,
            cp.design.cell_count(),
            cp.design.net_count()
        );
    }
    Ok(cp)
}
