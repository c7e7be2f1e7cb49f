//! Kernel version identification and protection rules.
//!
//! - [`version`] extracts the `MAJOR.MINOR.PATCH-ABI` base version from
//!   package names, directory names and `uname -r` output.
//! - [`protection`] decides which base versions must survive this run.

pub mod protection;
pub mod version;

pub use protection::{ProtectedVersions, newest_image_package};
pub use version::KernelVersion;
