//! Configuration constants and default value functions.

use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "KERNEL_SWEEP_CONFIG";

/// Config file consulted when `KERNEL_SWEEP_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/kernel-sweep/config.yaml";

/// Glob patterns matching versioned kernel packages.
///
/// The `[0-9]` keeps unversioned meta-packages such as `linux-image-amd64`
/// out of the query.
pub fn default_package_patterns() -> Vec<String> {
    vec![
        "linux-image-[0-9]*".to_string(),
        "linux-headers-[0-9]*".to_string(),
        "linux-modules-[0-9]*".to_string(),
        "linux-tools-[0-9]*".to_string(),
    ]
}

/// Directories whose `linux-*` children are checked for orphaned kernels.
pub fn default_sweep_roots() -> Vec<PathBuf> {
    [
        "/usr/src",
        "/usr/lib/linux-tools",
        "/usr/lib/modules",
        "/lib/modules",
        "/usr/lib/linux-tools-*",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

// Default value functions for serde
pub(crate) fn default_query_program() -> String {
    "dpkg-query".to_string()
}
pub(crate) fn default_purge_command() -> String {
    "apt-get purge --autoremove".to_string()
}
pub(crate) fn default_usage_mount() -> PathBuf {
    PathBuf::from("/")
}
