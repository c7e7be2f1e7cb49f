//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for a kernel-sweep run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Package manager settings
    // =========================================================================
    /// Glob patterns handed to the package query tool.
    #[serde(default = "default_package_patterns")]
    pub package_patterns: Vec<String>,

    /// Package database query program (dpkg-query compatible).
    #[serde(default = "default_query_program")]
    pub query_program: String,

    /// Purge command line; package names (and `-y` under `--yes`) are appended.
    #[serde(default = "default_purge_command")]
    pub purge_command: String,

    // =========================================================================
    // Filesystem settings
    // =========================================================================
    /// Roots whose immediate `linux-*` children are swept.
    /// Entries may end in a glob pattern such as `/usr/lib/linux-tools-*`.
    #[serde(default = "default_sweep_roots")]
    pub sweep_roots: Vec<PathBuf>,

    /// Mount point whose used space is reported before and after.
    #[serde(default = "default_usage_mount")]
    pub usage_mount: PathBuf,

    /// Append-only NDJSON audit log of removals (disabled when unset).
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_patterns: default_package_patterns(),
            query_program: default_query_program(),
            purge_command: default_purge_command(),
            sweep_roots: default_sweep_roots(),
            usage_mount: default_usage_mount(),
            event_log: None,
        }
    }
}
