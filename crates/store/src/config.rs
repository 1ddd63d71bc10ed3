//! Environment-driven configuration for the storage layer.

use std::path::PathBuf;

use jewelbill_invoicing::BillDefaults;

use crate::file_kv::{default_data_dir, FileKv};
use crate::local::LocalStore;
use crate::offline::ConnectivityState;

pub const DATA_DIR_VAR: &str = "JEWELBILL_DATA_DIR";
pub const SELLER_GSTIN_VAR: &str = "JEWELBILL_SELLER_GSTIN";
pub const FIRST_INVOICE_VAR: &str = "JEWELBILL_FIRST_INVOICE";
pub const START_OFFLINE_VAR: &str = "JEWELBILL_START_OFFLINE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub start_offline: bool,
    pub defaults: BillDefaults,
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let dir = default_data_dir()?;
                tracing::debug!(dir = ?dir, "{DATA_DIR_VAR} not set; using app data directory");
                dir
            }
        };

        let mut defaults = BillDefaults::default();
        match get(SELLER_GSTIN_VAR) {
            Some(gstin) => defaults.seller_gstin = gstin.trim().to_string(),
            None => tracing::warn!(
                gstin = %defaults.seller_gstin,
                "{SELLER_GSTIN_VAR} not set; using built-in seller GSTIN"
            ),
        }
        if let Some(number) = get(FIRST_INVOICE_VAR) {
            defaults.first_invoice_number = number.trim().to_string();
        }

        let start_offline = get(START_OFFLINE_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            data_dir,
            start_offline,
            defaults,
        })
    }

    pub fn connectivity(&self) -> ConnectivityState {
        if self.start_offline {
            ConnectivityState::Offline
        } else {
            ConnectivityState::Online
        }
    }

    /// Open file-backed local storage in the configured directory.
    pub fn open_local(&self) -> anyhow::Result<LocalStore<FileKv>> {
        Ok(LocalStore::new(FileKv::open(&self.data_dir)?))
    }
}
