//! Loading and saving payload slots.
//!
//! Read-modify-write cycles go through a [`SlotTransaction`], which holds
//! SQLite's write lock from the first load until commit. Two processes or
//! tasks updating the same database therefore queue up instead of
//! overwriting each other's changes.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result},
    models::MergePayload,
};

const SELECT_PAYLOAD_SQL: &str = "SELECT body FROM payloads WHERE slot = ?1";
const UPSERT_PAYLOAD_SQL: &str = "INSERT INTO payloads (slot, body, saved_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(slot) DO UPDATE SET body = excluded.body, saved_at = excluded.saved_at";

/// Named payload storage locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The working goal set
    Current,
    /// Common ancestor for the next three-way merge
    SyncBase,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Current => "current",
            Slot::SyncBase => "sync_base",
        }
    }
}

/// Slot access inside one immediate write transaction.
///
/// Dropping it without calling [`commit`](Self::commit) rolls back every
/// save made through it.
pub struct SlotTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl SlotTransaction<'_> {
    /// Loads the payload stored in `slot`, if any.
    pub fn load(&self, slot: Slot) -> Result<Option<MergePayload>> {
        load_slot(&self.tx, slot)
    }

    /// Stores `payload` in `slot`, replacing what was there.
    pub fn save(&self, slot: Slot, payload: &MergePayload) -> Result<()> {
        let body = payload.to_json()?;
        self.tx
            .execute(
                UPSERT_PAYLOAD_SQL,
                params![slot.as_str(), body, Timestamp::now().to_string()],
            )
            .db_context("Failed to save payload")?;
        debug!(
            "Saved {} goals to slot {}",
            payload.goals.len(),
            slot.as_str()
        );
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit().db_context("Failed to commit transaction")
    }
}

impl super::Database {
    /// Starts a write transaction, taking the database write lock up front.
    pub fn begin_write(&mut self) -> Result<SlotTransaction<'_>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;
        Ok(SlotTransaction { tx })
    }

    /// Loads the payload stored in `slot`, if any.
    pub fn load_payload(&self, slot: Slot) -> Result<Option<MergePayload>> {
        load_slot(&self.connection, slot)
    }

    /// Stores `payload` in `slot`, replacing what was there.
    pub fn save_payload(&mut self, slot: Slot, payload: &MergePayload) -> Result<()> {
        self.save_payload_to(&[slot], payload)
    }

    /// Writes `payload` to several slots in one transaction.
    pub fn save_payload_to(&mut self, slots: &[Slot], payload: &MergePayload) -> Result<()> {
        let tx = self.begin_write()?;
        for slot in slots {
            tx.save(*slot, payload)?;
        }
        tx.commit()
    }
}

fn load_slot(connection: &Connection, slot: Slot) -> Result<Option<MergePayload>> {
    let body: Option<String> = connection
        .query_row(SELECT_PAYLOAD_SQL, params![slot.as_str()], |row| row.get(0))
        .optional()
        .db_context("Failed to query payload")?;

    body.map(|json| MergePayload::from_json(&json)).transpose()
}
