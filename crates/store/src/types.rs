//! Shared types for stored bills and sync results.

use serde::{Deserialize, Serialize};

use jewelbill_core::BillId;
use jewelbill_invoicing::BillRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Present in the remote store.
    Synced,
    /// Saved locally while the remote store was unreachable.
    PendingSync,
}

/// A bill as kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBill {
    #[serde(flatten)]
    pub record: BillRecord,
    /// Remote document reference once uploaded.
    #[serde(default)]
    pub remote_ref: Option<String>,
    pub sync: SyncState,
}

impl StoredBill {
    pub fn synced(record: BillRecord, remote_ref: impl Into<String>) -> Self {
        Self {
            record,
            remote_ref: Some(remote_ref.into()),
            sync: SyncState::Synced,
        }
    }

    pub fn pending(record: BillRecord) -> Self {
        Self {
            record,
            remote_ref: None,
            sync: SyncState::PendingSync,
        }
    }

    pub fn id(&self) -> BillId {
        self.record.id_typed()
    }

    pub fn is_pending(&self) -> bool {
        self.sync == SyncState::PendingSync
    }

    pub fn mark_synced(&mut self, remote_ref: impl Into<String>) {
        self.remote_ref = Some(remote_ref.into());
        self.sync = SyncState::Synced;
    }
}

impl AsRef<BillRecord> for StoredBill {
    fn as_ref(&self) -> &BillRecord {
        &self.record
    }
}

/// A bill as held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBill {
    pub remote_ref: String,
    pub record: BillRecord,
}

impl From<RemoteBill> for StoredBill {
    fn from(bill: RemoteBill) -> Self {
        StoredBill::synced(bill.record, bill.remote_ref)
    }
}

/// Outcome of uploading pending bills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: Vec<BillId>,
    pub failed: Vec<(BillId, String)>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
