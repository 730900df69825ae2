//! Export, import and synchronisation operations for the Tracker.

use jiff::Timestamp;
use log::info;
use tokio::task;

use super::Tracker;
use crate::{
    db::{Database, Slot},
    error::{Result, TrackerError},
    models::MergePayload,
    reconcile::{self, MergeOutcome},
    store::GoalStore,
};

impl Tracker {
    /// Exports the current goal set as a freshly stamped payload.
    pub async fn export_payload(&self) -> Result<MergePayload> {
        self.read(|store, now| store.to_payload(now)).await
    }

    /// Replaces the current goal set with `payload` and reschedules it.
    ///
    /// The sync base is left alone, so a later sync still merges against the
    /// last shared state.
    pub async fn import_payload(&self, payload: MergePayload) -> Result<MergePayload> {
        self.mutate(move |store, now| {
            *store = GoalStore::import(payload, now);
            info!("Imported {} goals", store.goals().len());
            Ok(store.to_payload(now))
        })
        .await
    }

    /// Reconciles the current goal set with a payload from another device.
    ///
    /// The last synced payload serves as the common ancestor (a two-way merge
    /// is used on the first sync). The merged result is rescheduled and
    /// stored as both the current goal set and the new sync base; the
    /// returned payload is what the other device should receive.
    pub async fn sync_with(&self, remote: MergePayload) -> Result<MergeOutcome> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let tx = db.begin_write()?;
            let base = tx.load(Slot::SyncBase)?;
            let local = tx.load(Slot::Current)?.unwrap_or_default();
            let now = Timestamp::now();

            let outcome = reconcile::merge_with_report(base.as_ref(), &local, &remote, now);
            let store = GoalStore::import(outcome.payload, now);
            let payload = store.to_payload(now);
            tx.save(Slot::Current, &payload)?;
            tx.save(Slot::SyncBase, &payload)?;
            tx.commit()?;

            info!(
                "Synced {} goals ({} local wins, {} remote wins)",
                payload.goals.len(),
                outcome.report.local_wins,
                outcome.report.remote_wins
            );
            Ok(MergeOutcome {
                payload,
                report: outcome.report,
            })
        })
        .await
        .map_err(TrackerError::task_join)?
    }
}
