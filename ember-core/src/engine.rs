//! Intent and notification dispatch
//!
//! The engine separates intent dispatch (presentation -> core) from
//! notification dispatch (core -> presentation). The presentation layer
//! emits [`Intent`]s, the engine applies them to the task store, and the
//! resulting [`Notification`]s drive rendering and celebratory effects.
//! The core stays UI-framework-agnostic.

use crate::badges::BadgeSet;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::task::{TaskId, TaskStore};

/// A user intent emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddTask { text: String },
    ToggleTask { index: usize },
    DeleteTask { index: usize },
    ReorderTask { from: usize, to: usize },
}

/// A state-change notification consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The task list content or order changed
    TaskListChanged,
    /// A task transitioned to completed. Only `false -> true` transitions
    /// produce this; it drives celebratory effects and the quote refresh.
    TaskCompleted { id: TaskId },
    /// Points or streak changed
    MetricsChanged { metrics: Metrics },
    /// A milestone was earned for the first time
    BadgeEarned { milestone: u32 },
}

/// Owns the task list, the badge set, and the cached metrics snapshot
pub struct Engine {
    store: TaskStore,
    badges: BadgeSet,
    metrics: Metrics,
}

impl Engine {
    /// Create an engine with no tasks and no badges
    pub fn new() -> Self {
        Self::from_snapshot(TaskStore::new(), BadgeSet::new())
    }

    /// Restore an engine from persisted state.
    ///
    /// Metrics are recomputed from the task list, never trusted from a
    /// persisted snapshot.
    pub fn from_snapshot(store: TaskStore, badges: BadgeSet) -> Self {
        let metrics = Metrics::of(&store);
        Self {
            store,
            badges,
            metrics,
        }
    }

    /// The task list
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Earned badges
    pub fn badges(&self) -> &BadgeSet {
        &self.badges
    }

    /// Current metrics snapshot
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Apply a single intent and return the notifications it produced.
    ///
    /// A failed intent (invalid index) leaves all state unchanged. An
    /// `AddTask` with whitespace-only text is a silent no-op producing no
    /// notifications. `MetricsChanged` is emitted only when points or
    /// streak actually changed; `BadgeEarned` fires at most once per
    /// milestone, in ascending order.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<Notification>> {
        let mut notifications = Vec::new();

        match intent {
            Intent::AddTask { text } => {
                if self.store.add(text).is_none() {
                    return Ok(notifications);
                }
                notifications.push(Notification::TaskListChanged);
            }
            Intent::ToggleTask { index } => {
                let completed = self.store.toggle(index)?;
                notifications.push(Notification::TaskListChanged);
                if completed && let Some(task) = self.store.get(index) {
                    notifications.push(Notification::TaskCompleted { id: task.id });
                }
            }
            Intent::DeleteTask { index } => {
                self.store.delete(index)?;
                notifications.push(Notification::TaskListChanged);
            }
            Intent::ReorderTask { from, to } => {
                self.store.reorder(from, to)?;
                notifications.push(Notification::TaskListChanged);
            }
        }

        let metrics = Metrics::of(&self.store);
        if metrics != self.metrics {
            self.metrics = metrics;
            notifications.push(Notification::MetricsChanged { metrics });
        }

        for milestone in self.badges.award(self.metrics.points) {
            notifications.push(Notification::BadgeEarned { milestone });
        }

        Ok(notifications)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn engine_with(count: usize) -> Engine {
        let mut engine = Engine::new();
        for i in 0..count {
            engine
                .apply(Intent::AddTask {
                    text: format!("task {}", i + 1),
                })
                .unwrap();
        }
        engine
    }

    fn complete_all(engine: &mut Engine) -> Vec<Notification> {
        let mut all = Vec::new();
        for index in 0..engine.store().len() {
            all.extend(engine.apply(Intent::ToggleTask { index }).unwrap());
        }
        all
    }

    #[test]
    fn test_empty_add_is_silent_noop() {
        let mut engine = Engine::new();

        let notifications = engine
            .apply(Intent::AddTask {
                text: "   ".to_string(),
            })
            .unwrap();

        assert!(notifications.is_empty());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_add_changes_list_but_not_metrics() {
        let mut engine = Engine::new();

        let notifications = engine
            .apply(Intent::AddTask {
                text: "water plants".to_string(),
            })
            .unwrap();

        assert_eq!(notifications, vec![Notification::TaskListChanged]);
    }

    #[test]
    fn test_completion_produces_full_sequence() {
        let mut engine = engine_with(1);

        let notifications = engine.apply(Intent::ToggleTask { index: 0 }).unwrap();

        assert_eq!(
            notifications,
            vec![
                Notification::TaskListChanged,
                Notification::TaskCompleted { id: TaskId(1) },
                Notification::MetricsChanged {
                    metrics: Metrics {
                        points: 10,
                        streak: 1
                    }
                },
            ]
        );
    }

    #[test]
    fn test_uncompleting_emits_no_task_completed() {
        let mut engine = engine_with(1);
        engine.apply(Intent::ToggleTask { index: 0 }).unwrap();

        let notifications = engine.apply(Intent::ToggleTask { index: 0 }).unwrap();

        assert_eq!(
            notifications,
            vec![
                Notification::TaskListChanged,
                Notification::MetricsChanged {
                    metrics: Metrics::default()
                },
            ]
        );
    }

    #[test]
    fn test_three_completions_earn_no_badge() {
        let mut engine = engine_with(3);
        let notifications = complete_all(&mut engine);

        assert_eq!(engine.metrics().points, 30);
        assert_eq!(engine.metrics().streak, 3);
        assert!(engine.badges().is_empty());
        assert!(
            !notifications
                .iter()
                .any(|n| matches!(n, Notification::BadgeEarned { .. }))
        );
    }

    #[test]
    fn test_fifth_completion_earns_first_badge_once() {
        let mut engine = engine_with(5);
        let notifications = complete_all(&mut engine);

        let earned: Vec<u32> = notifications
            .iter()
            .filter_map(|n| match n {
                Notification::BadgeEarned { milestone } => Some(*milestone),
                _ => None,
            })
            .collect();
        assert_eq!(earned, vec![5]);

        // Re-toggling the same task must not report the badge again
        engine.apply(Intent::ToggleTask { index: 4 }).unwrap();
        let notifications = engine.apply(Intent::ToggleTask { index: 4 }).unwrap();
        assert!(
            !notifications
                .iter()
                .any(|n| matches!(n, Notification::BadgeEarned { .. }))
        );
        assert!(engine.badges().contains(5));
    }

    #[test]
    fn test_badges_survive_deleting_completed_tasks() {
        let mut engine = engine_with(5);
        complete_all(&mut engine);

        for _ in 0..5 {
            engine.apply(Intent::DeleteTask { index: 0 }).unwrap();
        }

        assert_eq!(engine.metrics().points, 0);
        assert!(engine.badges().contains(5));
    }

    #[test]
    fn test_reorder_can_break_the_streak() {
        let mut engine = engine_with(3);
        engine.apply(Intent::ToggleTask { index: 0 }).unwrap();
        engine.apply(Intent::ToggleTask { index: 1 }).unwrap();
        assert_eq!(engine.metrics().streak, 2);

        let notifications = engine
            .apply(Intent::ReorderTask { from: 2, to: 0 })
            .unwrap();

        assert_eq!(
            notifications,
            vec![
                Notification::TaskListChanged,
                Notification::MetricsChanged {
                    metrics: Metrics {
                        points: 20,
                        streak: 0
                    }
                },
            ]
        );
    }

    #[test]
    fn test_invalid_index_leaves_state_unchanged() {
        let mut engine = engine_with(3);
        let before: Vec<_> = engine.store().tasks().to_vec();

        let err = engine.apply(Intent::ToggleTask { index: 5 }).unwrap_err();

        assert_eq!(err, CoreError::IndexOutOfRange { index: 5, len: 3 });
        assert_eq!(engine.store().tasks(), before.as_slice());
        assert_eq!(engine.metrics(), Metrics::default());
    }

    #[test]
    fn test_snapshot_restore_recomputes_metrics() {
        let mut store = TaskStore::new();
        store.add("a");
        store.add("b");
        store.toggle(0).unwrap();
        store.toggle(1).unwrap();

        let engine = Engine::from_snapshot(store, BadgeSet::new());

        assert_eq!(
            engine.metrics(),
            Metrics {
                points: 20,
                streak: 2
            }
        );
    }
}
