//! Tests for the cleanup run.

use super::run_cleanup;
use super::types::{CleanupOptions, CleanupOutcome};
use crate::error::SweepError;
use crate::test_support::{FakeHost, create_kernel_tree, sandbox_config};
use std::io::Cursor;

const YES: CleanupOptions = CleanupOptions {
    assume_yes: true,
    dry_run: false,
};

const INTERACTIVE: CleanupOptions = CleanupOptions {
    assume_yes: false,
    dry_run: false,
};

const DRY_RUN: CleanupOptions = CleanupOptions {
    assume_yes: false,
    dry_run: true,
};

const TREE: &[&str] = &[
    "usr/src/linux-headers-5.15.0-10-generic",
    "usr/src/linux-headers-6.1.0-18-generic",
    "usr/src/nvidia-535.1.0-1",
    "usr/lib/modules/5.15.0-10-generic",
    "usr/lib/linux-tools-5.15.0-10/linux-tools-5.15.0-10-extra",
];

fn ubuntu_host() -> FakeHost {
    FakeHost::new(
        "6.1.0-18-generic",
        &[
            "linux-image-5.15.0-10-generic",
            "linux-image-6.1.0-18-generic",
            "linux-image-6.1.0-18-generic-unsigned",
            "linux-headers-5.15.0-10-generic",
            "linux-headers-6.1.0-18-generic",
            "linux-modules-5.15.0-10-generic",
            "linux-tools-5.15.0-10",
            "linux-image-generic",
        ],
    )
}

fn no_input() -> Cursor<&'static str> {
    Cursor::new("")
}

#[test]
fn test_removes_old_kernel_and_keeps_running_and_newest() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host().with_usage(&[10_000, 4_000]);

    let outcome = run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    let CleanupOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert_eq!(report.plan.images, vec!["linux-image-5.15.0-10-generic"]);
    assert_eq!(report.plan.headers, vec!["linux-headers-5.15.0-10-generic"]);
    assert_eq!(report.plan.modules, vec!["linux-modules-5.15.0-10-generic"]);
    assert_eq!(report.plan.tools, vec!["linux-tools-5.15.0-10"]);
    assert_eq!(report.reclaimed_kb, Some(6_000));

    // One combined purge call, images first.
    let purges = host.purges.borrow();
    assert_eq!(purges.len(), 1);
    assert_eq!(
        purges[0].0,
        vec![
            "linux-image-5.15.0-10-generic",
            "linux-headers-5.15.0-10-generic",
            "linux-modules-5.15.0-10-generic",
            "linux-tools-5.15.0-10",
        ]
    );
    assert!(purges[0].1, "--yes must reach the package manager");

    let root = tree.path();
    assert!(!root.join("usr/src/linux-headers-5.15.0-10-generic").exists());
    assert!(
        !root
            .join("usr/lib/linux-tools-5.15.0-10/linux-tools-5.15.0-10-extra")
            .exists()
    );
    assert!(root.join("usr/src/linux-headers-6.1.0-18-generic").exists());
    assert!(root.join("usr/src/nvidia-535.1.0-1").exists());
    // Module directories are named by release, without the linux- prefix.
    assert!(root.join("usr/lib/modules/5.15.0-10-generic").exists());
    assert_eq!(report.sweep.removed.len(), 2);
}

#[test]
fn test_signed_and_unsigned_images_of_running_kernel_are_kept() {
    let tree = create_kernel_tree(&[]);
    let config = sandbox_config(tree.path());
    let host = FakeHost::new(
        "6.1.0-18-generic",
        &[
            "linux-image-5.15.0-10-generic",
            "linux-image-6.1.0-18-generic",
            "linux-image-6.1.0-18-generic-unsigned",
        ],
    );

    let outcome = run_cleanup(&host, &config, DRY_RUN, &mut no_input()).unwrap();

    let CleanupOutcome::DryRun(plan) = outcome else {
        panic!("expected a dry run, got {:?}", outcome);
    };
    assert_eq!(plan.images, vec!["linux-image-5.15.0-10-generic"]);
    assert!(plan.headers.is_empty() && plan.modules.is_empty() && plan.tools.is_empty());
}

#[test]
fn test_unsigned_image_does_not_decide_newest() {
    let tree = create_kernel_tree(&[]);
    let config = sandbox_config(tree.path());
    let host = FakeHost::new(
        "5.15.0-10-generic",
        &[
            "linux-image-5.15.0-10-generic",
            "linux-image-6.1.0-18-generic",
            "linux-image-6.2.0-1-generic-unsigned",
        ],
    );

    let outcome = run_cleanup(&host, &config, DRY_RUN, &mut no_input()).unwrap();

    let CleanupOutcome::DryRun(plan) = outcome else {
        panic!("expected a dry run, got {:?}", outcome);
    };
    // Newest is 6.1.0-18; the newer unsigned package is not protected by itself.
    assert_eq!(plan.images, vec!["linux-image-6.2.0-1-generic-unsigned"]);
    assert_eq!(plan.kept.len(), 2);
}

#[test]
fn test_no_kernel_packages_is_nothing_to_do() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = FakeHost::new("6.1.0-18-generic", &[]);

    let outcome = run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    assert_eq!(outcome, CleanupOutcome::NothingToDo);
    assert!(host.purges.borrow().is_empty());
    // The sweep is skipped as well.
    assert!(tree.path().join("usr/src/linux-headers-5.15.0-10-generic").exists());
    assert!(!tree.path().join("events.ndjson").exists());
}

#[test]
fn test_dry_run_touches_nothing() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host();

    let outcome = run_cleanup(&host, &config, DRY_RUN, &mut Cursor::new("y\n")).unwrap();

    let CleanupOutcome::DryRun(plan) = outcome else {
        panic!("expected a dry run, got {:?}", outcome);
    };
    assert_eq!(plan.len(), 4);
    assert!(host.purges.borrow().is_empty());
    assert_eq!(host.installed().len(), 8);
    assert!(tree.path().join("usr/src/linux-headers-5.15.0-10-generic").exists());
    assert!(!tree.path().join("events.ndjson").exists());
}

#[test]
fn test_dry_run_wins_over_yes() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host();
    let options = CleanupOptions {
        assume_yes: true,
        dry_run: true,
    };

    let outcome = run_cleanup(&host, &config, options, &mut no_input()).unwrap();

    assert!(matches!(outcome, CleanupOutcome::DryRun(_)));
    assert!(host.purges.borrow().is_empty());
}

#[test]
fn test_dry_run_plan_matches_real_plan() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());

    let dry = run_cleanup(&ubuntu_host(), &config, DRY_RUN, &mut no_input()).unwrap();
    let real = run_cleanup(&ubuntu_host(), &config, YES, &mut no_input()).unwrap();

    let (CleanupOutcome::DryRun(dry_plan), CleanupOutcome::Completed(report)) = (dry, real) else {
        panic!("unexpected outcomes");
    };
    assert_eq!(dry_plan, report.plan);
}

#[test]
fn test_declined_confirmation_aborts() {
    for answer in ["n\n", "\n", "nope\n", ""] {
        let tree = create_kernel_tree(TREE);
        let config = sandbox_config(tree.path());
        let host = ubuntu_host();

        let outcome = run_cleanup(&host, &config, INTERACTIVE, &mut Cursor::new(answer)).unwrap();

        assert!(
            matches!(outcome, CleanupOutcome::Aborted(_)),
            "answer {:?} should abort",
            answer
        );
        assert!(host.purges.borrow().is_empty());
        assert!(tree.path().join("usr/src/linux-headers-5.15.0-10-generic").exists());
    }
}

#[test]
fn test_confirmed_run_purges_interactively() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host();

    let outcome = run_cleanup(&host, &config, INTERACTIVE, &mut Cursor::new("y\n")).unwrap();

    assert!(matches!(outcome, CleanupOutcome::Completed(_)));
    let purges = host.purges.borrow();
    assert_eq!(purges.len(), 1);
    assert!(!purges[0].1, "interactive runs leave the package manager interactive");
}

#[test]
fn test_empty_plan_skips_confirmation_and_still_sweeps() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = FakeHost::new(
        "6.1.0-18-generic",
        &["linux-image-6.1.0-18-generic", "linux-headers-6.1.0-18-generic"],
    );

    // No input available: a prompt would abort the run.
    let outcome = run_cleanup(&host, &config, INTERACTIVE, &mut no_input()).unwrap();

    let CleanupOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert!(report.plan.is_empty());
    assert!(host.purges.borrow().is_empty());
    assert!(!tree.path().join("usr/src/linux-headers-5.15.0-10-generic").exists());
    assert!(tree.path().join("usr/src/linux-headers-6.1.0-18-generic").exists());
}

#[test]
fn test_purge_failure_is_fatal_and_skips_sweep() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host().failing_purge("apt-get exited with code 100");

    let result = run_cleanup(&host, &config, YES, &mut no_input());

    assert!(matches!(result, Err(SweepError::PurgeFailed(_))));
    assert!(tree.path().join("usr/src/linux-headers-5.15.0-10-generic").exists());
}

#[test]
fn test_second_run_is_a_no_op() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host();

    run_cleanup(&host, &config, YES, &mut no_input()).unwrap();
    let outcome = run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    let CleanupOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert!(report.plan.is_empty());
    assert!(report.sweep.removed.is_empty());
    assert_eq!(host.purges.borrow().len(), 1);
}

#[test]
fn test_unmeasurable_usage_is_not_fatal() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host();

    let outcome = run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    let CleanupOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert_eq!(report.reclaimed_kb, None);
}

#[test]
fn test_growth_in_usage_is_reported_as_non_positive() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host().with_usage(&[5_000, 5_200]);

    let outcome = run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    let CleanupOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert_eq!(report.reclaimed_kb, Some(-200));
}

#[test]
fn test_audit_log_records_each_phase() {
    let tree = create_kernel_tree(TREE);
    let config = sandbox_config(tree.path());
    let host = ubuntu_host().with_usage(&[2_000, 1_000]);

    run_cleanup(&host, &config, YES, &mut no_input()).unwrap();

    let content = std::fs::read_to_string(tree.path().join("events.ndjson")).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let actions: Vec<&str> = events
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["purge", "sweep", "summary"]);
    assert_eq!(events[0]["details"]["packages"].as_array().unwrap().len(), 4);
    assert_eq!(events[1]["details"]["removed"].as_array().unwrap().len(), 2);
    assert_eq!(events[2]["details"]["reclaimed_kb"], 1_000);
}
