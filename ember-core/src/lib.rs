//! Ember Core - Pure domain logic for the gamified task tracker
//!
//! This crate contains no I/O operations. Persistence and rendering
//! are handled by adapters in consuming crates.

pub mod badges;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod task;

pub use badges::{BadgeSet, MILESTONES};
pub use engine::{Engine, Intent, Notification};
pub use error::{CoreError, Result};
pub use metrics::{Metrics, progress_percent};
pub use task::{Task, TaskId, TaskStore};
