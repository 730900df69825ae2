//! Command-line argument types and the command handlers behind them.
//!
//! Argument structs carry the clap derives and convert into the
//! framework-free parameter types of `lodestar_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::Timestamp;
use lodestar_core::{
    display::{
        CreateResult, DeleteResult, HistoryLog, MergeSummary, OperationStatus, UpdateResult,
    },
    models::{lenient, Goal, GoalStatus, MergePayload},
    params::{CreateGoal, Id, RevertGoal, SetStatus, UpdateGoal},
    Tracker,
};
use log::debug;

use crate::renderer::TerminalRenderer;

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_deadline(s: &str) -> Result<Timestamp, String> {
    lenient::parse_timestamp_str(s)
        .ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

/// Create a new goal
#[derive(Args)]
pub struct AddGoalArgs {
    /// Title of the goal
    pub title: String,
    /// Optional description with more context
    #[arg(short, long)]
    pub description: Option<String>,
    /// How much you want this, 1 to 5
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub motivation: u8,
    /// How pressing it is, 1 to 5
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub urgency: u8,
    /// Due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_deadline)]
    pub deadline: Option<Timestamp>,
}

impl From<AddGoalArgs> for CreateGoal {
    fn from(val: AddGoalArgs) -> Self {
        CreateGoal {
            title: val.title,
            description: val.description,
            motivation: val.motivation,
            urgency: val.urgency,
            deadline: val.deadline,
        }
    }
}

/// Change a goal's details
///
/// Only the given fields change. Changing motivation, urgency or the deadline
/// can change which goals are active.
#[derive(Args)]
pub struct UpdateGoalArgs {
    /// ID of the goal to update
    pub id: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New motivation, 1 to 5
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub motivation: Option<u8>,
    /// New urgency, 1 to 5
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub urgency: Option<u8>,
    /// New due date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_deadline)]
    pub deadline: Option<Timestamp>,
    /// Remove the due date
    #[arg(long, conflicts_with = "deadline")]
    pub clear_deadline: bool,
}

impl From<UpdateGoalArgs> for UpdateGoal {
    fn from(val: UpdateGoalArgs) -> Self {
        UpdateGoal {
            title: val.title,
            description: val.description,
            motivation: val.motivation,
            urgency: val.urgency,
            deadline: if val.clear_deadline {
                Some(None)
            } else {
                val.deadline.map(Some)
            },
        }
    }
}

/// Identifies a single goal
#[derive(Args)]
pub struct GoalIdArgs {
    /// ID of the goal
    pub id: String,
}

impl From<GoalIdArgs> for Id {
    fn from(val: GoalIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Set a goal's status
///
/// Completing or abandoning a goal frees its slot. Setting `active` or
/// `paused` hands the goal back to the scheduler.
#[derive(Args)]
pub struct SetStatusArgs {
    /// ID of the goal
    pub id: String,
    /// New status
    #[arg(value_enum)]
    pub status: GoalStatusArg,
}

impl From<SetStatusArgs> for SetStatus {
    fn from(val: SetStatusArgs) -> Self {
        SetStatus {
            id: val.id,
            status: val.status.into(),
        }
    }
}

/// Roll a goal back to the state before a history entry
#[derive(Args)]
pub struct RevertGoalArgs {
    /// ID of the goal
    pub id: String,
    /// ID of the history entry to roll back (see `goal history`)
    pub entry_id: String,
}

impl From<RevertGoalArgs> for RevertGoal {
    fn from(val: RevertGoalArgs) -> Self {
        RevertGoal {
            id: val.id,
            entry_id: val.entry_id,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal
    #[command(alias = "a")]
    Add(AddGoalArgs),
    /// List goals by priority
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a goal
    #[command(alias = "s")]
    Show(GoalIdArgs),
    /// Change a goal's details
    #[command(alias = "u")]
    Update(UpdateGoalArgs),
    /// Set a goal's status
    Status(SetStatusArgs),
    /// Delete a goal permanently
    #[command(aliases = ["d", "rm"])]
    Delete(GoalIdArgs),
    /// Record a check-in on a goal
    #[command(alias = "ci")]
    CheckIn(GoalIdArgs),
    /// Show a goal's change history
    #[command(alias = "h")]
    History(GoalIdArgs),
    /// Roll a goal back to an earlier state
    Revert(RevertGoalArgs),
}

/// Change how many goals may be active at once
#[derive(Args)]
pub struct CapacityArgs {
    /// Maximum number of active goals (at least 1)
    pub max_active_goals: usize,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change how many goals may be active at once
    Capacity(CapacityArgs),
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Write all goals and settings as JSON
    Export {
        /// File to write to instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all goals and settings with a JSON export
    Import {
        /// Exported JSON file
        file: PathBuf,
    },
    /// Merge a JSON export from another device into this one
    ///
    /// The merged result is written back to the file so the other device
    /// can pick it up.
    Merge {
        /// Shared JSON file
        file: PathBuf,
        /// Leave the file untouched
        #[arg(long)]
        no_write_back: bool,
    },
}

/// Command-line representation of goal status values
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum GoalStatusArg {
    Active,
    Paused,
    #[value(alias = "done")]
    Completed,
    Abandoned,
}

impl From<GoalStatusArg> for GoalStatus {
    fn from(val: GoalStatusArg) -> Self {
        match val {
            GoalStatusArg::Active => GoalStatus::Active,
            GoalStatusArg::Paused => GoalStatus::Paused,
            GoalStatusArg::Completed => GoalStatus::Completed,
            GoalStatusArg::Abandoned => GoalStatus::Abandoned,
        }
    }
}

impl std::fmt::Display for GoalStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", GoalStatus::from(*self))
    }
}

fn not_found(id: &str) -> String {
    format!("Goal {id} not found")
}

/// Changes recorded on `goal` since `previous` was read, as display lines.
fn new_changes(previous: &Goal, goal: &Goal) -> Vec<String> {
    let last_seen = previous.history.last().map(|entry| entry.id.as_str());
    let mut fresh: Vec<_> = goal
        .history
        .iter()
        .rev()
        .take_while(|entry| Some(entry.id.as_str()) != last_seen)
        .collect();
    fresh.reverse();
    fresh
        .into_iter()
        .flat_map(|entry| entry.changes.iter().map(ToString::to_string))
        .collect()
}

/// Runs CLI commands against a tracker and renders the results.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Add(args) => self.add_goal(args.into()).await,
            GoalCommands::List => self.list_goals().await,
            GoalCommands::Show(args) => self.show_goal(&args.into()).await,
            GoalCommands::Update(args) => self.update_goal(args).await,
            GoalCommands::Status(args) => self.set_status(args.into()).await,
            GoalCommands::Delete(args) => self.delete_goal(&args.into()).await,
            GoalCommands::CheckIn(args) => self.check_in(&args.into()).await,
            GoalCommands::History(args) => self.show_history(&args.into()).await,
            GoalCommands::Revert(args) => self.revert_goal(args.into()).await,
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => self.show_settings().await,
            SettingsCommands::Capacity(args) => self.set_capacity(args.max_active_goals).await,
        }
    }

    pub async fn handle_sync_command(&self, command: SyncCommands) -> Result<()> {
        match command {
            SyncCommands::Export { output } => self.export(output.as_deref()).await,
            SyncCommands::Import { file } => self.import(&file).await,
            SyncCommands::Merge {
                file,
                no_write_back,
            } => self.merge(&file, !no_write_back).await,
        }
    }

    pub async fn list_goals(&self) -> Result<()> {
        let goals = self.tracker.goals_overview().await?;
        self.renderer.render(&goals.to_string())
    }

    async fn require_goal(&self, id: &str) -> Result<Goal> {
        self.tracker
            .get_goal(&Id { id: id.to_string() })
            .await?
            .with_context(|| not_found(id))
    }

    async fn add_goal(&self, params: CreateGoal) -> Result<()> {
        let goal = self.tracker.create_goal(&params).await?;
        self.renderer.render(&CreateResult::new(goal).to_string())
    }

    async fn show_goal(&self, params: &Id) -> Result<()> {
        let goal = self.require_goal(&params.id).await?;
        self.renderer.render(&goal.to_string())
    }

    async fn update_goal(&self, args: UpdateGoalArgs) -> Result<()> {
        let id = args.id.clone();
        let previous = self.require_goal(&id).await?;
        let goal = self
            .tracker
            .update_goal(&id, args.into())
            .await?
            .with_context(|| not_found(&id))?;

        let changes = new_changes(&previous, &goal);
        debug!("Update of {id} recorded {} changes", changes.len());
        self.renderer
            .render(&UpdateResult::with_changes(goal, changes).to_string())
    }

    async fn set_status(&self, params: SetStatus) -> Result<()> {
        let previous = self.require_goal(&params.id).await?;
        let goal = self
            .tracker
            .set_status(&params)
            .await?
            .with_context(|| not_found(&params.id))?;

        let changes = new_changes(&previous, &goal);
        self.renderer
            .render(&UpdateResult::with_changes(goal, changes).to_string())
    }

    async fn delete_goal(&self, params: &Id) -> Result<()> {
        let goal = self
            .tracker
            .delete_goal(params)
            .await?
            .with_context(|| not_found(&params.id))?;
        self.renderer.render(&DeleteResult::new(goal).to_string())
    }

    async fn check_in(&self, params: &Id) -> Result<()> {
        let goal = self
            .tracker
            .check_in(params)
            .await?
            .with_context(|| not_found(&params.id))?;

        let status = OperationStatus::success(format!(
            "Checked in on '{}' ({} check-ins)",
            goal.title,
            goal.check_in_dates.len()
        ));
        self.renderer.render(&status.to_string())
    }

    async fn show_history(&self, params: &Id) -> Result<()> {
        let history = self
            .tracker
            .history(params)
            .await?
            .with_context(|| not_found(&params.id))?;
        self.renderer.render(&HistoryLog(history).to_string())
    }

    async fn revert_goal(&self, params: RevertGoal) -> Result<()> {
        let previous = self.require_goal(&params.id).await?;
        let goal = self.tracker.revert_goal(&params).await?.with_context(|| {
            format!(
                "Cannot revert goal {} to entry {}: the entry is unknown or has no earlier state",
                params.id, params.entry_id
            )
        })?;

        let changes = new_changes(&previous, &goal);
        self.renderer
            .render(&UpdateResult::with_changes(goal, changes).to_string())
    }

    async fn show_settings(&self) -> Result<()> {
        let settings = self.tracker.settings().await?;

        let mut output = String::from("# Settings\n\n");
        output.push_str(&format!(
            "- Max active goals: {}\n",
            settings.max_active_goals
        ));
        for (key, value) in &settings.extra {
            output.push_str(&format!("- {key}: {value}\n"));
        }
        self.renderer.render(&output)
    }

    async fn set_capacity(&self, capacity: usize) -> Result<()> {
        let plan = self.tracker.set_capacity(capacity).await?;
        let status = OperationStatus::success(format!(
            "Up to {capacity} goals can be active ({} active now)",
            plan.to_activate.len()
        ));
        self.renderer.render(&status.to_string())
    }

    async fn export(&self, output: Option<&Path>) -> Result<()> {
        let payload = self.tracker.export_payload().await?;
        let json = payload.to_json()?;

        match output {
            Some(path) => {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status = OperationStatus::success(format!(
                    "Exported {} goals to {}",
                    payload.goals.len(),
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }

    async fn import(&self, file: &Path) -> Result<()> {
        let payload = read_payload(file)?;
        let imported = self.tracker.import_payload(payload).await?;
        let status = OperationStatus::success(format!(
            "Imported {} goals from {}",
            imported.goals.len(),
            file.display()
        ));
        self.renderer.render(&status.to_string())
    }

    async fn merge(&self, file: &Path, write_back: bool) -> Result<()> {
        let remote = read_payload(file)?;
        let outcome = self.tracker.sync_with(remote).await?;

        if write_back {
            fs::write(file, format!("{}\n", outcome.payload.to_json()?))
                .with_context(|| format!("Failed to write {}", file.display()))?;
        }

        let summary = MergeSummary {
            report: &outcome.report,
            goal_count: outcome.payload.goals.len(),
        };
        self.renderer.render(&summary.to_string())
    }
}

fn read_payload(file: &Path) -> Result<MergePayload> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    MergePayload::from_json(&json)
        .with_context(|| format!("{} is not a goal export", file.display()))
}
