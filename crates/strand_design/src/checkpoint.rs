//! Checkpoint loading.
//!
//! A checkpoint is a JSON document holding a [`CellDesign`] and the
//! [`Device`] slice it is placed and routed on:
//!
//! ```text
//! { "design": { "name": ..., "part": ..., "cells": [...], ... },
//!   "device": { "part": ..., "tiles": [...], "sites": [...], "wires": [...] } }
//! ```
//!
//! Files ending in `.gz` are decompressed on the fly. Loading rebuilds the
//! name indices and validates every cross-reference, so consumers may index
//! the model directly.

use crate::data::CellDesign;
use crate::validate::validate_design;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strand_device::Device;

/// Errors that can occur while loading a checkpoint.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// The checkpoint file could not be read.
    #[error("failed to read checkpoint: {0}")]
    Io(#[from] std::io::Error),

    /// The checkpoint is not well-formed JSON or does not match the model.
    #[error("failed to parse checkpoint: {0}")]
    Parse(#[from] serde_json::Error),

    /// The checkpoint parsed but contains dangling or inconsistent references.
    #[error("invalid checkpoint: {0}")]
    Invalid(String),
}

/// A loaded design together with its device slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// The placed-and-routed design.
    pub design: CellDesign,
    /// The device slice the design refers to.
    pub device: Device,
}

impl Checkpoint {
    /// Assembles a checkpoint from its parts, rebuilding the design's name
    /// indices and validating all references.
    pub fn new(mut design: CellDesign, device: Device) -> Result<Self, CheckpointError> {
        design.rebuild_indices();
        if design.part != device.part {
            log::warn!(
                "design '{}' targets part {} but the device slice is for {}",
                design.name,
                design.part,
                device.part
            );
        }
        validate_design(&design, &device).map_err(CheckpointError::Invalid)?;
        Ok(Self { design, device })
    }
}

/// Loads a checkpoint from a `.json` or `.json.gz` file.
pub fn load_checkpoint(path: &Path) -> Result<Checkpoint, CheckpointError> {
    let file = File::open(path)?;
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    let reader: Box<dyn Read> = if is_gzip {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    log::debug!("loading checkpoint {}", path.display());
    load_checkpoint_from_reader(BufReader::new(reader))
}

/// Loads a checkpoint from any reader producing JSON.
pub fn load_checkpoint_from_reader<R: Read>(reader: R) -> Result<Checkpoint, CheckpointError> {
    let raw: Checkpoint = serde_json::from_reader(reader)?;
    let checkpoint = Checkpoint::new(raw.design, raw.device)?;
    log::debug!(
        "loaded design '{}': {} cells, {} nets, {} wires",
        checkpoint.design.name,
        checkpoint.design.cell_count(),
        checkpoint.design.net_count(),
        checkpoint.device.wires.len()
    );
    Ok(checkpoint)
}

/// Loads a checkpoint from a JSON string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_checkpoint_from_str(content: &str) -> Result<Checkpoint, CheckpointError> {
    load_checkpoint_from_reader(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "design": {
            "name": "top",
            "part": "xc7a100tcsg324",
            "lib_cells": [{"name": "FDRE"}],
            "cells": [{"id": 0, "name": "q_reg", "lib_cell": "FDRE", "pins": [0]}],
            "pins": [{"id": 0, "name": "Q", "direction": "output", "cell": 0, "net": 0}],
            "nets": [{
                "id": 0,
                "name": "q",
                "source": 0,
                "routing": {"intersite": [{"nodes": [{"wire": 0}]}]}
            }]
        },
        "device": {
            "part": "xc7a100tcsg324",
            "tiles": [{"id": 0, "name": "INT_L_X0Y0", "tile_type": "INT_L"}],
            "wires": [{"id": 0, "owner": {"tile": 0}, "name": "LOGIC_OUTS0"}]
        }
    }"#;

    #[test]
    fn load_minimal_from_str() {
        let cp = load_checkpoint_from_str(MINIMAL).unwrap();
        assert_eq!(cp.design.cell_count(), 1);
        assert_eq!(cp.design.routed_count(), 1);
        assert!(cp.design.cell_by_name("q_reg").is_some());
        assert!(cp.design.net_by_name("q").is_some());
    }

    #[test]
    fn parse_error() {
        let err = load_checkpoint_from_str("{ not json").unwrap_err();
        assert!(matches!(err, CheckpointError::Parse(_)));
    }

    #[test]
    fn invalid_reference() {
        let broken = MINIMAL.replace(r#""lib_cell": "FDRE""#, r#""lib_cell": "LUT6""#);
        let err = load_checkpoint_from_str(&broken).unwrap_err();
        assert!(matches!(err, CheckpointError::Invalid(_)));
        assert!(err.to_string().starts_with("invalid checkpoint:"));
    }

    #[test]
    fn missing_id_is_a_parse_error() {
        let no_id = MINIMAL.replace(r#"{"id": 0, "name": "q_reg""#, r#"{"name": "q_reg""#);
        let err = load_checkpoint_from_str(&no_id).unwrap_err();
        assert!(matches!(err, CheckpointError::Parse(_)));
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn load_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let cp = load_checkpoint(&path).unwrap();
        assert_eq!(cp.device.part, "xc7a100tcsg324");
    }

    #[test]
    fn load_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(MINIMAL.as_bytes()).unwrap();
        enc.finish().unwrap();
        let cp = load_checkpoint(&path).unwrap();
        assert_eq!(cp.design.net_count(), 1);
    }

    #[test]
    fn missing_file() {
        let err = load_checkpoint(Path::new("/nonexistent/design.json")).unwrap_err();
        assert!(matches!(err, CheckpointError::Io(_)));
    }
}
