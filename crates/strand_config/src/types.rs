//! Configuration types deserialized from `strand.toml`.
//!
//! Every section and field is optional; a missing file is equivalent to an
//! empty one.

use serde::Deserialize;

/// The top-level configuration parsed from `strand.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrandConfig {
    /// Cell report settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Route trace settings.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Cell/bel mapping listing settings.
    #[serde(default)]
    pub mappings: MappingsConfig,
}

/// Settings for the per-cell report.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Cell type prefixes selecting which cells are reported.
    #[serde(default = "default_cell_types")]
    pub cell_types: Vec<String>,
    /// Property key prefixes that are never printed (memory contents).
    #[serde(default = "default_excluded_property_prefixes")]
    pub excluded_property_prefixes: Vec<String>,
    /// Whether to print cell pin to bel pin mappings.
    #[serde(default = "default_true")]
    pub pin_mappings: bool,
    /// Whether to print the route trace of every net a reported cell touches.
    #[serde(default = "default_true")]
    pub routes: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cell_types: default_cell_types(),
            excluded_property_prefixes: default_excluded_property_prefixes(),
            pin_mappings: true,
            routes: true,
        }
    }
}

/// Settings for route trace rendering.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Number of spaces added per branch level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

/// Settings for the cell/bel mapping listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingsConfig {
    /// Maximum number of distinct library cells listed.
    #[serde(default = "default_mapping_limit")]
    pub limit: usize,
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            limit: default_mapping_limit(),
        }
    }
}

fn default_cell_types() -> Vec<String> {
    vec!["RAMB".to_string()]
}

fn default_excluded_property_prefixes() -> Vec<String> {
    vec!["INIT_".to_string(), "INITP_".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    3
}

fn default_mapping_limit() -> usize {
    20
}
