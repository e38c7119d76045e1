//! Derived progress metrics
//!
//! Points and streak are pure functions of the task list. They are never
//! stored as independent truth, only snapshotted for display and
//! persistence.

use serde::{Deserialize, Serialize};

use crate::task::TaskStore;

/// Points awarded per completed task
pub const POINTS_PER_TASK: u32 = 10;

/// Snapshot of the derived metrics
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub points: u32,
    pub streak: u32,
}

impl Metrics {
    /// Recompute both metrics from the current task list
    pub fn of(store: &TaskStore) -> Self {
        Self {
            points: points(store),
            streak: streak(store),
        }
    }
}

/// `10 x` the completed count. No upper bound, no decay.
pub fn points(store: &TaskStore) -> u32 {
    store.completed_count() as u32 * POINTS_PER_TASK
}

/// Length of the leading run of completed tasks.
///
/// Order-sensitive: reordering changes the streak even when the
/// completed/incomplete counts are unchanged. The run breaks at the
/// first incomplete task, scanning from the start.
pub fn streak(store: &TaskStore) -> u32 {
    store.tasks().iter().take_while(|t| t.completed).count() as u32
}

/// Completion percentage for the progress bar, 0 for an empty list
pub fn progress_percent(store: &TaskStore) -> u32 {
    let total = store.len();
    if total == 0 {
        return 0;
    }
    ((store.completed_count() as f64 / total as f64) * 100.0).round() as u32
}
