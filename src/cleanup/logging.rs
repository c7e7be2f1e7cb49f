//! Audit logging for the cleanup flow.

use super::types::SweepResult;
use crate::config::Config;
use crate::events::{Event, EventAction, append_event};
use serde_json::json;

/// Record the combined purge invocation.
pub fn log_purge_event(config: &Config, packages: &[String]) {
    record(
        config,
        Event::new(EventAction::Purge).with_details(json!({ "packages": packages })),
    );
}

/// Record the directory sweep results.
pub fn log_sweep_event(config: &Config, result: &SweepResult) {
    let skipped: Vec<_> = result
        .skipped
        .iter()
        .map(|(path, reason)| json!({ "path": path, "reason": reason }))
        .collect();

    record(
        config,
        Event::new(EventAction::Sweep).with_details(json!({
            "removed": result.removed,
            "skipped": skipped,
        })),
    );
}

/// Record the space accounting for the run.
pub fn log_summary_event(config: &Config, reclaimed_kb: Option<i64>) {
    record(
        config,
        Event::new(EventAction::Summary).with_details(json!({ "reclaimed_kb": reclaimed_kb })),
    );
}

/// Append `event` when an event log is configured.
///
/// Runs after mutations have happened, so failures are only warned about.
fn record(config: &Config, event: Event) {
    let Some(path) = &config.event_log else {
        return;
    };

    if let Err(e) = append_event(path, &event) {
        tracing::warn!(action = %event.action, error = %e, "failed to write audit event");
    }
}
