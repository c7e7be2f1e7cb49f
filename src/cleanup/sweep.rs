//! Orphaned kernel directory sweeping.
//!
//! # Safety
//!
//! - Only immediate children of the sweep roots are considered
//! - Only children whose name starts with `linux-` are ever deleted
//! - Children without a base version in their name are left alone
//! - Symlinks are never followed or removed
//! - A failed deletion is logged and skipped, never fatal

use super::types::{OrphanedDirectory, SweepResult};
use crate::kernel::{KernelVersion, ProtectedVersions};
use globset::{Glob, GlobMatcher};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name prefix every sweepable directory must carry.
const KERNEL_DIR_PREFIX: &str = "linux-";

/// Expand configured sweep roots into concrete directories.
///
/// A root whose final component contains glob metacharacters (for example
/// `/usr/lib/linux-tools-*`) is matched against the entries of its parent
/// directory; each matching directory becomes its own root. Roots that do not
/// exist are dropped, and roots reaching the same directory through symlinks
/// (such as `/lib/modules` on merged-`/usr` systems) are scanned once.
pub fn expand_roots(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();
    let mut seen = HashSet::new();

    for root in roots {
        for dir in expand_root(root) {
            if !dir.is_dir() {
                tracing::debug!(root = %dir.display(), "sweep root does not exist, skipping");
                continue;
            }
            let canonical = dir.canonicalize().unwrap_or_else(|_| dir.clone());
            if seen.insert(canonical) {
                expanded.push(dir);
            }
        }
    }

    expanded
}

fn expand_root(root: &Path) -> Vec<PathBuf> {
    let Some(pattern) = root.file_name().and_then(|n| n.to_str()) else {
        return vec![root.to_path_buf()];
    };
    if !has_glob_meta(pattern) {
        return vec![root.to_path_buf()];
    }

    let Some(parent) = root.parent() else {
        return Vec::new();
    };

    let matcher = match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher(),
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "invalid sweep root pattern, skipping");
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = read_child_dirs(parent)
        .into_iter()
        .filter(|dir| name_matches(&matcher, dir))
        .collect();
    matches.sort();
    matches
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn name_matches(matcher: &GlobMatcher, path: &Path) -> bool {
    path.file_name().is_some_and(|name| matcher.is_match(name))
}

/// Immediate child directories of `dir`, excluding symlinks.
///
/// An unreadable directory yields nothing.
fn read_child_dirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot read directory, skipping");
            return Vec::new();
        }
    };

    entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.path())
        .collect()
}

/// Find kernel directories under `roots` whose version is not protected.
///
/// `roots` must already be expanded (see [`expand_roots`]). Results are
/// sorted per root for reproducible output.
pub fn find_orphaned_directories(
    roots: &[PathBuf],
    protection: &ProtectedVersions,
) -> Vec<OrphanedDirectory> {
    let mut orphans = Vec::new();

    for root in roots {
        let mut children = read_child_dirs(root);
        children.sort();

        for path in children {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with(KERNEL_DIR_PREFIX) {
                continue;
            }
            let Some(version) = KernelVersion::extract(name) else {
                tracing::debug!(path = %path.display(), "no base version, keeping");
                continue;
            };
            if protection.is_protected(name) {
                tracing::debug!(path = %path.display(), %version, "protected, keeping");
                continue;
            }

            orphans.push(OrphanedDirectory { path, version });
        }
    }

    orphans
}

/// Remove orphaned kernel directories under `roots`.
///
/// With `dry_run` set, the directories are reported but left in place.
/// Deletion failures are recorded in `skipped` and the sweep continues.
pub fn sweep(roots: &[PathBuf], protection: &ProtectedVersions, dry_run: bool) -> SweepResult {
    let mut result = SweepResult::default();

    for orphan in find_orphaned_directories(roots, protection) {
        if dry_run {
            println!("Would remove directory: {}", orphan.path.display());
            result.removed.push(orphan.path);
            continue;
        }

        println!("Removing directory: {}", orphan.path.display());
        tracing::info!(
            path = %orphan.path.display(),
            version = %orphan.version,
            "removing orphaned directory"
        );
        match fs::remove_dir_all(&orphan.path) {
            Ok(()) => result.removed.push(orphan.path),
            Err(e) => {
                tracing::warn!(
                    path = %orphan.path.display(),
                    error = %e,
                    "failed to remove directory, continuing"
                );
                result.skipped.push((orphan.path, e.to_string()));
            }
        }
    }

    result
}
