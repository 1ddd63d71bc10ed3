//! Bill storage with remote-first writes and a local fallback.
//!
//! Writes go to the remote store when online. If the remote call fails (or the
//! client is offline) the bill is kept locally, flagged pending, and uploaded
//! later by [`BillStorageService::sync_offline_bills`]. Every bill is also
//! mirrored locally so history works without a connection.

use chrono::{DateTime, NaiveDate, Utc};

use jewelbill_core::{BillId, CustomerId};
use jewelbill_invoicing::{next_invoice_number, BillDefaults, BillDraft, BillRecord, HistoryQuery};
use jewelbill_parties::{Customer, CustomerDetails};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueBackend;
use crate::local::LocalStore;
use crate::offline::{Connectivity, ConnectivityState};
use crate::remote::RemoteStore;
use crate::types::{StoredBill, SyncReport};

pub struct BillStorageService<R, B> {
    remote: R,
    local: LocalStore<B>,
    connectivity: Connectivity,
}

impl<R, B> BillStorageService<R, B>
where
    R: RemoteStore,
    B: KeyValueBackend,
{
    pub fn new(remote: R, local: LocalStore<B>) -> Self {
        Self::with_connectivity(remote, local, ConnectivityState::Online)
    }

    pub fn with_connectivity(remote: R, local: LocalStore<B>, state: ConnectivityState) -> Self {
        Self {
            remote,
            local,
            connectivity: Connectivity::new(state),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &LocalStore<B> {
        &self.local
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity.state()
    }

    pub fn set_offline(&mut self) {
        tracing::info!("switching to offline mode");
        self.connectivity.set_offline();
    }

    pub fn set_online(&mut self) {
        tracing::info!("switching to online mode");
        self.connectivity.set_online();
    }

    /// Run a remote call unless offline; failures are logged and become `None`.
    fn try_remote<T>(&self, op: &'static str, call: impl FnOnce(&R) -> StoreResult<T>) -> Option<T> {
        if self.connectivity.is_offline() {
            tracing::debug!(op, "offline; skipping remote store");
            return None;
        }
        match call(&self.remote) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(op, error = %err, "remote store call failed; using local storage");
                None
            }
        }
    }

    // -- bills --

    /// Persist a finalized bill.
    ///
    /// Never fails because the remote store is down: the bill is then kept
    /// locally as pending. Only local storage errors are returned.
    pub fn save_bill(&self, record: BillRecord) -> StoreResult<StoredBill> {
        let stored = match self.try_remote("insert_bill", |r| r.insert_bill(&record)) {
            Some(remote_ref) => {
                tracing::info!(
                    bill_id = %record.id_typed(),
                    invoice = record.invoice_number(),
                    remote_ref = %remote_ref,
                    "bill saved to remote store"
                );
                StoredBill::synced(record, remote_ref)
            }
            None => {
                tracing::info!(
                    bill_id = %record.id_typed(),
                    invoice = record.invoice_number(),
                    "bill saved locally; pending sync"
                );
                StoredBill::pending(record)
            }
        };

        self.local.put_bill(stored.clone())?;
        Ok(stored)
    }

    /// Finalize `draft`, save it and reset the draft for the next bill.
    pub fn save_draft(
        &self,
        draft: &mut BillDraft,
        defaults: &BillDefaults,
        now: DateTime<Utc>,
    ) -> StoreResult<StoredBill> {
        let record = draft.finalize(now)?;
        let stored = self.save_bill(record)?;
        draft.start_next(defaults);
        Ok(stored)
    }

    /// Look up a bill locally first, then remotely.
    pub fn bill_by_id(&self, id: BillId) -> StoreResult<Option<StoredBill>> {
        if let Some(bill) = self.local.bill(id)? {
            return Ok(Some(bill));
        }
        Ok(self
            .try_remote("get_bill", |r| r.get_bill(id))
            .flatten()
            .map(StoredBill::from))
    }

    /// Delete a bill everywhere it is stored.
    ///
    /// Bills that reached the remote store need a connection to delete;
    /// pending bills only live locally.
    pub fn delete_bill(&self, id: BillId) -> StoreResult<()> {
        let local = self.local.bill(id)?;
        let needs_remote = local.as_ref().is_none_or(|b| !b.is_pending());

        if needs_remote {
            self.connectivity.require_online()?;
            match self.remote.delete_bill(id) {
                Ok(()) => {}
                Err(StoreError::NotFound) if local.is_some() => {
                    tracing::warn!(bill_id = %id, "bill missing from remote store; removing local copy");
                }
                Err(err) => return Err(err),
            }
        }

        self.local.remove_bill(id)?;
        tracing::info!(bill_id = %id, "bill deleted");
        Ok(())
    }

    /// All known bills: remote bills plus local bills the remote store lacks.
    ///
    /// Falls back to local storage alone when the remote store is unreachable.
    pub fn load_history(&self) -> StoreResult<Vec<StoredBill>> {
        let local = self.local.bills()?;
        let Some(remote) = self.try_remote("list_bills", |r| r.list_bills()) else {
            return Ok(local);
        };

        let mut merged: Vec<StoredBill> = remote.into_iter().map(StoredBill::from).collect();
        for bill in local {
            if !merged.iter().any(|b| b.id() == bill.id()) {
                merged.push(bill);
            }
        }
        Ok(merged)
    }

    /// History filtered, searched and ordered by `query`.
    pub fn history(&self, query: &HistoryQuery, now: DateTime<Utc>) -> StoreResult<Vec<StoredBill>> {
        let bills = self.load_history()?;
        Ok(query.apply(&bills, now).into_iter().cloned().collect())
    }

    /// Upload every pending bill.
    ///
    /// Bills that upload are marked synced; failures stay pending and are
    /// reported. Requires the client to be online.
    pub fn sync_offline_bills(&self) -> StoreResult<SyncReport> {
        self.connectivity.require_online()?;

        let report = self.local.update_bills(|bills| {
            let mut report = SyncReport::default();
            for bill in bills.iter_mut().filter(|b| b.is_pending()) {
                match self.remote.insert_bill(&bill.record) {
                    Ok(remote_ref) => {
                        bill.mark_synced(remote_ref);
                        report.synced.push(bill.id());
                    }
                    Err(err) => {
                        tracing::warn!(bill_id = %bill.id(), error = %err, "failed to sync bill");
                        report.failed.push((bill.id(), err.to_string()));
                    }
                }
            }
            Ok(report)
        })?;

        tracing::info!(
            synced = report.synced.len(),
            failed = report.failed.len(),
            "offline bill sync finished"
        );
        Ok(report)
    }

    /// Invoice number for the next bill, from the full history.
    pub fn next_invoice_number(&self, defaults: &BillDefaults) -> StoreResult<String> {
        let bills = self.load_history()?;
        Ok(next_invoice_number(
            bills.iter().map(|b| b.record.invoice_number()),
            &defaults.first_invoice_number,
        ))
    }

    /// Empty draft numbered after the existing history.
    pub fn new_draft(&self, defaults: &BillDefaults, date: NaiveDate) -> StoreResult<BillDraft> {
        let number = self.next_invoice_number(defaults)?;
        Ok(BillDraft::new(defaults, number, date))
    }

    // -- customers --

    /// Save customer details locally and remotely (upsert by name + phone).
    ///
    /// The remote store's id wins when it already knew the customer.
    pub fn save_customer(&self, details: CustomerDetails) -> StoreResult<Customer> {
        let customer = self.local.upsert_customer(details)?;

        match self.try_remote("upsert_customer", |r| r.upsert_customer(&customer)) {
            Some(remote) => {
                if remote.id_typed() != customer.id_typed() {
                    self.local.remove_customer(customer.id_typed())?;
                    self.local.put_customer(remote.clone())?;
                }
                tracing::info!(customer_id = %remote.id_typed(), "customer saved");
                Ok(remote)
            }
            None => Ok(customer),
        }
    }

    /// Remote customer list, or the local one when unreachable.
    pub fn customers(&self) -> StoreResult<Vec<Customer>> {
        match self.try_remote("list_customers", |r| r.list_customers()) {
            Some(customers) => Ok(customers),
            None => Ok(self.local.customers()?.iter().cloned().collect()),
        }
    }

    /// Find a customer by name (ignoring case): local first, then remote.
    ///
    /// A remote hit is cached locally.
    pub fn find_customer_by_name(&self, name: &str) -> StoreResult<Option<Customer>> {
        if let Some(customer) = self.local.find_customer_by_name(name)? {
            return Ok(Some(customer));
        }

        let found = self
            .try_remote("find_customer_by_name", |r| r.find_customer_by_name(name))
            .flatten();
        if let Some(customer) = &found {
            self.local.put_customer(customer.clone())?;
            tracing::debug!(customer_id = %customer.id_typed(), "cached remote customer locally");
        }
        Ok(found)
    }

    /// Remove a customer locally and, when reachable, remotely.
    pub fn delete_customer(&self, id: CustomerId) -> StoreResult<()> {
        let removed_locally = self.local.remove_customer(id)?.is_some();
        let removed_remotely = self
            .try_remote("delete_customer", |r| r.delete_customer(id))
            .is_some();

        if !removed_locally && !removed_remotely {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
