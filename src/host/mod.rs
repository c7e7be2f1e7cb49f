//! External collaborators: the package manager and system inspection tools.
//!
//! The cleanup flow only talks to the [`KernelHost`] trait. [`DebianHost`]
//! implements it with `dpkg-query`, `apt-get`, `uname` and `df`; tests use an
//! in-memory host instead.

mod command;
mod debian;

pub use debian::DebianHost;

use crate::error::Result;

/// Operations the cleanup flow needs from the running system.
pub trait KernelHost {
    /// Release string of the running kernel, e.g. `6.1.0-18-amd64`.
    fn running_release(&self) -> Result<String>;

    /// Names of installed kernel-related packages, in package database order.
    fn installed_kernel_packages(&self) -> Result<Vec<String>>;

    /// Purge `packages` in one package manager invocation.
    ///
    /// `assume_yes` suppresses the package manager's own confirmation.
    fn purge(&self, packages: &[String], assume_yes: bool) -> Result<()>;

    /// Used kilobytes on the measured filesystem.
    fn used_kilobytes(&self) -> Result<u64>;
}
