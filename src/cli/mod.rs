//! CLI argument parsing for kernel-sweep.
//!
//! Uses clap derive macros for declarative argument definitions.

use clap::Parser;

/// Remove obsolete kernel packages and leftover kernel directories.
///
/// The running kernel and the newest installed kernel image are always kept.
/// Every other versioned linux-image, linux-headers, linux-modules and
/// linux-tools package is purged, then orphaned `linux-*` directories under
/// /usr/src, /usr/lib/modules, /lib/modules and /usr/lib/linux-tools* are
/// deleted.
#[derive(Parser, Debug)]
#[command(name = "kernel-sweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Do not ask for confirmation; run the package manager non-interactively.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show what would be removed without changing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}
