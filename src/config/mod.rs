//! Configuration model for kernel-sweep.
//!
//! The tool runs with built-in Debian defaults. An optional YAML file
//! (`/etc/kernel-sweep/config.yaml`, or the path in `KERNEL_SWEEP_CONFIG`)
//! can override the package patterns, the purge command, the sweep roots and
//! the audit log location. Unknown fields are ignored for forward
//! compatibility.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
