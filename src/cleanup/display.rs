//! Display and formatting utilities for cleanup output.

use super::types::{PackageCategory, RemovalPlan, SweepResult};
use crate::kernel::ProtectedVersions;

/// Print the running kernel, the protected versions, and the removal plan.
pub fn print_plan(release: &str, protection: &ProtectedVersions, plan: &RemovalPlan) {
    println!("Running kernel: {}", release);
    if protection.is_empty() {
        println!("Protected versions: (none detected)");
    } else {
        let versions: Vec<&str> = protection
            .sorted()
            .into_iter()
            .map(|v| v.as_str())
            .collect();
        println!("Protected versions: {}", versions.join(", "));
    }
    println!();

    if !plan.kept.is_empty() {
        println!("Keeping ({}):", plan.kept.len());
        for kept in &plan.kept {
            println!("  - {} ({})", kept.name, kept.reason);
        }
        println!();
    }

    if plan.is_empty() {
        println!("No old kernel packages to purge.");
        return;
    }

    println!("Packages to purge ({}):", plan.len());
    for category in PackageCategory::ALL {
        let bucket = plan.bucket(category);
        if bucket.is_empty() {
            continue;
        }
        println!("  {} ({}):", category, bucket.len());
        for name in bucket {
            println!("    - {}", name);
        }
    }
    println!();
}

/// Print the end-of-run summary.
pub fn print_report(sweep: &SweepResult, reclaimed_kb: Option<i64>) {
    println!();
    println!("Cleanup complete:");
    println!("  Directories removed: {}", sweep.removed.len());
    if !sweep.skipped.is_empty() {
        println!("  Directories skipped: {}", sweep.skipped.len());
        for (path, reason) in &sweep.skipped {
            println!("    - {}: {}", path.display(), reason);
        }
    }

    match reclaimed_kb {
        Some(kb) if kb > 0 => {
            println!("Freed approximately {} of disk space.", format_kilobytes(kb.unsigned_abs()))
        }
        Some(_) => println!("No significant disk space reclaimed."),
        None => println!("Unable to measure reclaimed disk space."),
    }

    if !sweep.removed.is_empty() {
        println!("Kernel directories were removed; run update-grub to refresh the boot menu.");
    }
}

/// Format a kilobyte count with binary units, e.g. `512K`, `1.5M`, `2.0G`.
pub fn format_kilobytes(kb: u64) -> String {
    const UNITS: [&str; 4] = ["M", "G", "T", "P"];

    if kb < 1024 {
        return format!("{}K", kb);
    }

    let mut value = kb as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1}{}", value, unit)
}
