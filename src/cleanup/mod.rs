//! The kernel cleanup run.
//!
//! Inspects installed kernel packages, works out which base versions are
//! protected (the running kernel and the newest installed image), purges
//! every other versioned kernel package in one package manager call, then
//! sweeps leftover `linux-*` directories and reports reclaimed space.
//!
//! # Safety
//!
//! - The running kernel's version and the newest image's version are never removed
//! - `--dry-run` prints the plan and touches nothing
//! - A non-empty plan needs confirmation unless `--yes` is given
//! - A failed purge stops the run before any directory is swept

mod display;
mod logging;
mod planning;
mod prompt;
mod sweep;
mod types;

#[cfg(test)]
mod tests;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::host::{DebianHost, KernelHost};
use crate::kernel::{ProtectedVersions, newest_image_package};
use std::io::BufRead;

use display::{print_plan, print_report};
use logging::{log_purge_event, log_summary_event, log_sweep_event};
use planning::classify_packages;
use prompt::confirm;
use sweep::{expand_roots, sweep};
use types::{CleanupOptions, CleanupOutcome, CleanupReport};

/// Execute a cleanup run against the live system.
pub fn cmd_cleanup(cli: Cli) -> Result<()> {
    let config = Config::discover()?;
    let host = DebianHost::detect(&config)?;
    let options = CleanupOptions {
        assume_yes: cli.yes,
        dry_run: cli.dry_run,
    };

    let stdin = std::io::stdin();
    match run_cleanup(&host, &config, options, &mut stdin.lock())? {
        CleanupOutcome::Completed(report) => tracing::info!(
            purged = report.plan.len(),
            removed = report.sweep.removed.len(),
            skipped = report.sweep.skipped.len(),
            reclaimed_kb = ?report.reclaimed_kb,
            "cleanup finished"
        ),
        outcome => tracing::info!(?outcome, "cleanup finished without changes"),
    }
    Ok(())
}

/// Run the cleanup flow against `host`.
///
/// Confirmation answers are read from `input`. Returns how the run ended;
/// only inspection failures and a failed purge are errors.
pub fn run_cleanup<H, R>(
    host: &H,
    config: &Config,
    options: CleanupOptions,
    input: &mut R,
) -> Result<CleanupOutcome>
where
    H: KernelHost,
    R: BufRead,
{
    let release = host.running_release()?;
    let packages = host.installed_kernel_packages()?;
    tracing::info!(%release, count = packages.len(), "inspected installed kernels");

    if packages.is_empty() {
        println!("No kernel packages found. Nothing to do.");
        return Ok(CleanupOutcome::NothingToDo);
    }

    let newest = newest_image_package(&packages);
    let protection = ProtectedVersions::build(&release, newest);
    tracing::info!(newest = ?newest, protected = protection.len(), "built protected set");

    let plan = classify_packages(&packages, &protection);
    print_plan(&release, &protection, &plan);

    if options.dry_run {
        println!("(Dry run: nothing was removed)");
        return Ok(CleanupOutcome::DryRun(plan));
    }

    let used_before = measure_usage(host);

    if !plan.is_empty() {
        if !options.assume_yes
            && !confirm(input, &format!("Purge {} package(s)?", plan.len()))
        {
            println!("Aborted. Nothing was removed.");
            return Ok(CleanupOutcome::Aborted(plan));
        }

        let packages = plan.packages();
        println!("Purging {} package(s)...", packages.len());
        host.purge(&packages, options.assume_yes)?;
        log_purge_event(config, &packages);
    }

    let roots = expand_roots(&config.sweep_roots);
    tracing::info!(roots = roots.len(), "sweeping orphaned kernel directories");
    let swept = sweep(&roots, &protection, false);
    log_sweep_event(config, &swept);

    let reclaimed_kb = used_before
        .zip(measure_usage(host))
        .map(|(before, after)| before as i64 - after as i64);
    print_report(&swept, reclaimed_kb);
    log_summary_event(config, reclaimed_kb);

    Ok(CleanupOutcome::Completed(CleanupReport {
        plan,
        sweep: swept,
        reclaimed_kb,
    }))
}

fn measure_usage<H: KernelHost>(host: &H) -> Option<u64> {
    host.used_kilobytes()
        .inspect_err(|e| tracing::warn!(error = %e, "could not measure disk usage"))
        .ok()
}
