//! Local storage of bills and customers.
//!
//! Everything lives as JSON arrays under two keys of a [`KeyValueBackend`].
//! Unreadable JSON reads as empty so a corrupt file never blocks billing. Before
//! the first write over it, the raw text is moved to [`backup_key`], and a
//! write is refused if that backup slot is already taken.

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use jewelbill_core::{BillId, CustomerId};
use jewelbill_parties::{Customer, CustomerDetails, CustomerDirectory};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueBackend;
use crate::types::StoredBill;

pub const BILLS_KEY: &str = "jewelryShop_bills";
pub const CUSTOMERS_KEY: &str = "jewelryShop_customers";

/// Key holding the unreadable text last found under `key`.
pub fn backup_key(key: &str) -> String {
    format!("{key}_corrupt")
}

#[derive(Debug)]
pub struct LocalStore<B> {
    backend: B,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl<B: KeyValueBackend> LocalStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_json<T>(&self, key: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(text) = self.backend.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "unreadable local data; treating as empty");
                Ok(T::default())
            }
        }
    }

    /// Like [`read_json`](Self::read_json), but unreadable text is moved to
    /// [`backup_key`] first. Fails rather than overwrite an earlier backup.
    fn read_for_write<T>(&self, key: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(text) = self.backend.get(key)? else {
            return Ok(T::default());
        };
        let err = match serde_json::from_str(&text) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let backup = backup_key(key);
        if self.backend.get(&backup)?.is_some() {
            tracing::error!(
                key,
                backup = %backup,
                error = %err,
                "unreadable local data and backup slot already used; refusing to overwrite"
            );
            return Err(StoreError::Serialization(err));
        }

        self.backend.set(&backup, &text)?;
        tracing::error!(key, backup = %backup, error = %err, "unreadable local data moved to backup");
        Ok(T::default())
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value)?;
        self.backend.set(key, &text)
    }

    fn modify<T, R>(&self, key: &str, f: impl FnOnce(&mut T) -> StoreResult<R>) -> StoreResult<R>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        let mut value: T = self.read_for_write(key)?;
        let out = f(&mut value)?;
        self.write_json(key, &value)?;
        Ok(out)
    }

    // -- bills --

    pub fn bills(&self) -> StoreResult<Vec<StoredBill>> {
        self.read_json(BILLS_KEY)
    }

    pub fn bill(&self, id: BillId) -> StoreResult<Option<StoredBill>> {
        Ok(self.bills()?.into_iter().find(|b| b.id() == id))
    }

    pub fn pending_bills(&self) -> StoreResult<Vec<StoredBill>> {
        Ok(self.bills()?.into_iter().filter(StoredBill::is_pending).collect())
    }

    /// Append a bill, or replace the stored bill with the same id.
    pub fn put_bill(&self, bill: StoredBill) -> StoreResult<()> {
        self.modify(BILLS_KEY, |bills: &mut Vec<StoredBill>| {
            match bills.iter_mut().find(|b| b.id() == bill.id()) {
                Some(slot) => *slot = bill,
                None => bills.push(bill),
            }
            Ok(())
        })
    }

    /// Run `f` over the stored bills and write the result back.
    pub fn update_bills<R>(&self, f: impl FnOnce(&mut Vec<StoredBill>) -> StoreResult<R>) -> StoreResult<R> {
        self.modify(BILLS_KEY, f)
    }

    pub fn remove_bill(&self, id: BillId) -> StoreResult<Option<StoredBill>> {
        self.modify(BILLS_KEY, |bills: &mut Vec<StoredBill>| {
            Ok(bills
                .iter()
                .position(|b| b.id() == id)
                .map(|idx| bills.remove(idx)))
        })
    }

    // -- customers --

    pub fn customers(&self) -> StoreResult<CustomerDirectory> {
        self.read_json(CUSTOMERS_KEY)
    }

    /// Insert or update by name + phone.
    pub fn upsert_customer(&self, details: CustomerDetails) -> StoreResult<Customer> {
        self.modify(CUSTOMERS_KEY, |dir: &mut CustomerDirectory| {
            Ok(dir.upsert(details)?)
        })
    }

    /// Store a customer that already carries an id (matched by id, then name + phone).
    pub fn put_customer(&self, customer: Customer) -> StoreResult<()> {
        self.modify(CUSTOMERS_KEY, |dir: &mut CustomerDirectory| {
            dir.put(customer);
            Ok(())
        })
    }

    pub fn find_customer_by_name(&self, name: &str) -> StoreResult<Option<Customer>> {
        Ok(self.customers()?.find_by_name(name).cloned())
    }

    pub fn remove_customer(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        self.modify(CUSTOMERS_KEY, |dir: &mut CustomerDirectory| {
            Ok(dir.remove(id).ok())
        })
    }
}
