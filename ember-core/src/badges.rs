//! Badge milestones
//!
//! Milestones label completed-task counts; with each task worth 10
//! points, the threshold for milestone `m` is `m * 10` points. A badge,
//! once earned, is never revoked even if points later drop.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Fixed milestone list, ascending
pub const MILESTONES: [u32; 4] = [5, 10, 20, 50];

/// Monotone set of earned milestones
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct BadgeSet {
    earned: BTreeSet<u32>,
}

impl BadgeSet {
    /// Create an empty badge set
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the set for the given points total.
    ///
    /// Returns the milestones newly earned by this call, in ascending
    /// order. Several may be earned at once when points jump across
    /// multiple thresholds. Milestones already in the set are never
    /// reported again.
    pub fn award(&mut self, points: u32) -> Vec<u32> {
        let mut newly = Vec::new();
        for milestone in MILESTONES {
            if points >= milestone * 10 && self.earned.insert(milestone) {
                newly.push(milestone);
            }
        }
        newly
    }

    /// Check if a milestone has been earned
    pub fn contains(&self, milestone: u32) -> bool {
        self.earned.contains(&milestone)
    }

    /// Earned milestones in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.earned.iter().copied()
    }

    /// Count earned milestones
    pub fn len(&self) -> usize {
        self.earned.len()
    }

    /// Check if no milestone has been earned yet
    pub fn is_empty(&self) -> bool {
        self.earned.is_empty()
    }
}
