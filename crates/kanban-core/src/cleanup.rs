//! Retention sweep and dense renumbering, run as one pass per command
//! cycle before every render and every persistence write.

use crate::{Board, TaskStatus};
use chrono::{DateTime, Duration, Utc};

/// Done tasks older than this many days since completion are purged.
pub const RETENTION_DAYS: i64 = 7;

/// Run cleanup then renumber atomically. Returns how many tasks were
/// removed. After this pass the set of ids is exactly `{1..=N}`.
pub fn run_cycle(board: &mut Board, now: DateTime<Utc>) -> usize {
    let removed = sweep_stale(board, now);
    board.renumber();
    removed
}

/// Remove Done tasks completed strictly more than the retention window
/// ago. A task completed exactly `RETENTION_DAYS` ago is retained.
fn sweep_stale(board: &mut Board, now: DateTime<Utc>) -> usize {
    let window = Duration::days(RETENTION_DAYS);
    board.retain(|task| match (task.status, task.completion_date) {
        (TaskStatus::Done, Some(done_at)) => now.signed_duration_since(done_at) <= window,
        _ => true,
    })
}
