//! Persistence for bills and customers.
//!
//! A remote document store is tried first; local key/value storage holds a
//! mirror of everything plus bills saved while the remote store was down.

pub mod config;
pub mod error;
pub mod file_kv;
pub mod kv;
pub mod local;
pub mod offline;
pub mod remote;
pub mod service;
pub mod types;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file_kv::{default_data_dir, FileKv};
pub use kv::{InMemoryKv, KeyValueBackend};
pub use local::{backup_key, LocalStore, BILLS_KEY, CUSTOMERS_KEY};
pub use offline::{Connectivity, ConnectivityState};
pub use remote::{InMemoryRemote, RemoteStore};
pub use service::BillStorageService;
pub use types::{RemoteBill, StoredBill, SyncReport, SyncState};
