//! Display formatting for goals, histories and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add collection and operation context on top. Everything
//! renders as markdown, which the CLI pipes through its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers        │    │   Formatted     │
//! │ (Goal, History) │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Goals, HistoryLog)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult, MergeSummary)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use lodestar_core::{display::CreateResult, models::Goal};
//!
//! let goal = Goal::new("Run 5k".to_string(), String::new(), 4, 3, None, Timestamp::now());
//! let output = CreateResult::new(goal.clone()).to_string();
//! assert!(output.contains(&format!("Created goal with ID: {}", goal.id)));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Goals, HistoryLog};
pub use datetime::{LocalDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, MergeSummary, UpdateResult};
pub use status::OperationStatus;
