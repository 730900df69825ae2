//! Async tracker API over the persisted goal set.
//!
//! [`Tracker`] is what applications talk to. Each call opens the database on
//! a blocking thread, loads the `current` payload into a [`GoalStore`], runs
//! exactly one store operation to completion and writes the result back.
//! Mutations hold the database write lock from load to save, so calls never
//! interleave inside one store and the engine itself stays free of locking.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Tracker     │    │    GoalStore    │    │    Database     │
//! │ (goal_ops,      │───▶│ (scheduler,     │───▶│ (payload slots) │
//! │  sync_ops)      │    │  ledger, merge) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use lodestar_core::{params::CreateGoal, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/lodestar.db"))
//!     .build()
//!     .await?;
//!
//! let goal = tracker
//!     .create_goal(&CreateGoal {
//!         title: "Run 5k".to_string(),
//!         description: None,
//!         motivation: 4,
//!         urgency: 3,
//!         deadline: None,
//!     })
//!     .await?;
//! println!("{goal}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::Timestamp;
use tokio::task;

use crate::{
    db::{Database, Slot},
    error::{Result, TrackerError},
    store::GoalStore,
};

pub mod builder;
pub mod goal_ops;
pub mod sync_ops;

pub use builder::TrackerBuilder;

/// Main tracker interface for managing goals.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs a read-only closure against the current goal set.
    pub(crate) async fn read<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&GoalStore, Timestamp) -> T + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let store = load_store(&db)?;
            Ok(f(&store, Timestamp::now()))
        })
        .await
        .map_err(TrackerError::task_join)?
    }

    /// Runs a mutating closure against the current goal set and saves the
    /// result. Nothing is saved when the closure fails.
    ///
    /// Load and save share one write transaction, so concurrent calls, even
    /// from other processes, wait for each other.
    pub(crate) async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut GoalStore, Timestamp) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let tx = db.begin_write()?;
            let mut store = tx
                .load(Slot::Current)?
                .map(GoalStore::from_payload)
                .unwrap_or_default();
            let now = Timestamp::now();
            let out = f(&mut store, now)?;
            tx.save(Slot::Current, &store.to_payload(now))?;
            tx.commit()?;
            Ok(out)
        })
        .await
        .map_err(TrackerError::task_join)?
    }
}

fn load_store(db: &Database) -> Result<GoalStore> {
    Ok(db
        .load_payload(Slot::Current)?
        .map(GoalStore::from_payload)
        .unwrap_or_default())
}
