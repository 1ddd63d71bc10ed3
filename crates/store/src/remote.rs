//! Remote (cloud) document store abstraction.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use jewelbill_core::{BillId, CustomerId};
use jewelbill_invoicing::BillRecord;
use jewelbill_parties::{Customer, CustomerDirectory};

use crate::error::{StoreError, StoreResult};
use crate::types::RemoteBill;

/// Remote persistence for bills and customers.
///
/// Implementations are expected to fail with [`StoreError::Remote`] when
/// the store cannot be reached; callers fall back to local storage.
pub trait RemoteStore: Send + Sync {
    /// Store a new bill, returning its remote document reference.
    fn insert_bill(&self, record: &BillRecord) -> StoreResult<String>;

    fn get_bill(&self, id: BillId) -> StoreResult<Option<RemoteBill>>;

    fn list_bills(&self) -> StoreResult<Vec<RemoteBill>>;

    fn delete_bill(&self, id: BillId) -> StoreResult<()>;

    /// Insert or update by name + phone.
    ///
    /// Returns the stored customer; an existing remote entry keeps its id.
    fn upsert_customer(&self, customer: &Customer) -> StoreResult<Customer>;

    fn list_customers(&self) -> StoreResult<Vec<Customer>>;

    /// First customer whose name matches ignoring case.
    fn find_customer_by_name(&self, name: &str) -> StoreResult<Option<Customer>>;

    fn delete_customer(&self, id: CustomerId) -> StoreResult<()>;
}

impl<S> RemoteStore for Arc<S>
where
    S: RemoteStore + ?Sized,
{
    fn insert_bill(&self, record: &BillRecord) -> StoreResult<String> {
        (**self).insert_bill(record)
    }

    fn get_bill(&self, id: BillId) -> StoreResult<Option<RemoteBill>> {
        (**self).get_bill(id)
    }

    fn list_bills(&self) -> StoreResult<Vec<RemoteBill>> {
        (**self).list_bills()
    }

    fn delete_bill(&self, id: BillId) -> StoreResult<()> {
        (**self).delete_bill(id)
    }

    fn upsert_customer(&self, customer: &Customer) -> StoreResult<Customer> {
        (**self).upsert_customer(customer)
    }

    fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        (**self).list_customers()
    }

    fn find_customer_by_name(&self, name: &str) -> StoreResult<Option<Customer>> {
        (**self).find_customer_by_name(name)
    }

    fn delete_customer(&self, id: CustomerId) -> StoreResult<()> {
        (**self).delete_customer(id)
    }
}

#[derive(Debug, Default)]
struct RemoteState {
    bills: Vec<RemoteBill>,
    customers: CustomerDirectory,
}

/// In-memory remote store for tests/dev.
///
/// [`set_available(false)`](Self::set_available) makes every call fail as
/// an unreachable cloud would.
#[derive(Debug)]
pub struct InMemoryRemote {
    state: RwLock<RemoteState>,
    available: AtomicBool,
    next_ref: AtomicU64,
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self {
            state: RwLock::new(RemoteState::default()),
            available: AtomicBool::new(true),
            next_ref: AtomicU64::new(1),
        }
    }
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StoreError::remote("remote store unavailable"))
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, RemoteState>> {
        self.ensure_available()?;
        self.state
            .read()
            .map_err(|_| StoreError::remote("lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, RemoteState>> {
        self.ensure_available()?;
        self.state
            .write()
            .map_err(|_| StoreError::remote("lock poisoned"))
    }
}

impl RemoteStore for InMemoryRemote {
    fn insert_bill(&self, record: &BillRecord) -> StoreResult<String> {
        let mut state = self.write()?;
        if let Some(existing) = state
            .bills
            .iter()
            .find(|b| b.record.id_typed() == record.id_typed())
        {
            return Ok(existing.remote_ref.clone());
        }

        let remote_ref = format!("doc-{}", self.next_ref.fetch_add(1, Ordering::SeqCst));
        state.bills.push(RemoteBill {
            remote_ref: remote_ref.clone(),
            record: record.clone(),
        });
        Ok(remote_ref)
    }

    fn get_bill(&self, id: BillId) -> StoreResult<Option<RemoteBill>> {
        let state = self.read()?;
        Ok(state.bills.iter().find(|b| b.record.id_typed() == id).cloned())
    }

    fn list_bills(&self) -> StoreResult<Vec<RemoteBill>> {
        Ok(self.read()?.bills.clone())
    }

    fn delete_bill(&self, id: BillId) -> StoreResult<()> {
        let mut state = self.write()?;
        let idx = state
            .bills
            .iter()
            .position(|b| b.record.id_typed() == id)
            .ok_or(StoreError::NotFound)?;
        state.bills.remove(idx);
        Ok(())
    }

    fn upsert_customer(&self, customer: &Customer) -> StoreResult<Customer> {
        let mut state = self.write()?;
        let existing = state
            .customers
            .iter()
            .find(|c| c.details().same_customer_as(customer.details()))
            .map(Customer::id_typed);

        let stored = match existing {
            Some(id) => Customer::with_id(id, customer.details().clone())?,
            None => customer.clone(),
        };
        state.customers.put(stored.clone());
        Ok(stored)
    }

    fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.read()?.customers.iter().cloned().collect())
    }

    fn find_customer_by_name(&self, name: &str) -> StoreResult<Option<Customer>> {
        Ok(self.read()?.customers.find_by_name(name).cloned())
    }

    fn delete_customer(&self, id: CustomerId) -> StoreResult<()> {
        let mut state = self.write()?;
        state.customers.remove(id).map_err(|_| StoreError::NotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewelbill_parties::CustomerDetails;

    #[test]
    fn unavailable_store_fails_every_call() {
        let remote = InMemoryRemote::new();
        remote.set_available(false);
        assert!(matches!(remote.list_bills(), Err(StoreError::Remote(_))));
        assert!(matches!(
            remote.find_customer_by_name("x"),
            Err(StoreError::Remote(_))
        ));
    }

    #[test]
    fn customer_upsert_keeps_remote_id() {
        let remote = InMemoryRemote::new();
        let details = CustomerDetails::named("Asha Verma").with_phone("98100");
        let first = remote
            .upsert_customer(&Customer::register(details.clone()).unwrap())
            .unwrap();

        let other = Customer::register(details.with_address("Lajpat Nagar")).unwrap();
        let stored = remote.upsert_customer(&other).unwrap();

        assert_eq!(stored.id_typed(), first.id_typed());
        assert_eq!(remote.list_customers().unwrap().len(), 1);
        assert_eq!(stored.details().address, "Lajpat Nagar");
    }
}
