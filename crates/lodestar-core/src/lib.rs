//! Core library for the Lodestar goal tracker.
//!
//! Lodestar keeps a personal set of goals, decides which of them deserve the
//! user's attention right now and keeps copies of the goal set on several
//! devices in agreement.
//!
//! - [`priority`] scores goals and picks the active set under a capacity
//!   limit.
//! - [`ledger`] records a bounded audit trail per goal and rolls goals back
//!   to earlier states.
//! - [`store`] runs every goal operation through validation, auditing and
//!   rescheduling.
//! - [`reconcile`] merges goal sets edited independently on two devices.
//! - [`tracker`] persists the goal set in SQLite behind an async API.
//!
//! The engine modules are synchronous, pure functions of their inputs and an
//! explicit `now`; only [`tracker`] touches the clock, the filesystem and the
//! database.
//!
//! # Quick Start
//!
//! ```rust
//! use lodestar_core::{params::CreateGoal, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("goals.db"))
//!     .build()
//!     .await?;
//!
//! let goal = tracker
//!     .create_goal(&CreateGoal {
//!         title: "Learn Rust".to_string(),
//!         description: Some("Finish the book".to_string()),
//!         motivation: 5,
//!         urgency: 3,
//!         deadline: None,
//!     })
//!     .await?;
//! println!("Created goal: {goal}");
//!
//! for goal in tracker.list_goals().await? {
//!     println!("{} is {}", goal.title, goal.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod params;
pub mod priority;
pub mod reconcile;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Goals, HistoryLog, LocalDateTime, MergeSummary, OperationStatus,
    UpdateResult,
};
pub use error::{Result, TrackerError};
pub use models::{
    Goal, GoalStatus, History, HistoryEntry, HistoryEvent, MergePayload, Settings, Snapshot,
};
pub use params::{CreateGoal, Id, RevertGoal, SetStatus, UpdateGoal};
pub use reconcile::{merge, merge_two, merge_with_report, MergeOutcome, MergeReport};
pub use store::GoalStore;
pub use tracker::{Tracker, TrackerBuilder};
