//! Connectivity state for the remote store.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    #[default]
    Online,
    /// Remote store is not attempted; everything goes to local storage.
    Offline,
}

#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    state: ConnectivityState,
}

impl Connectivity {
    pub fn new(state: ConnectivityState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn set_offline(&mut self) {
        self.state = ConnectivityState::Offline;
    }

    pub fn set_online(&mut self) {
        self.state = ConnectivityState::Online;
    }

    pub fn is_offline(&self) -> bool {
        self.state == ConnectivityState::Offline
    }

    /// Ensure the client is online; return error if offline.
    pub fn require_online(&self) -> StoreResult<()> {
        if self.is_offline() {
            Err(StoreError::Offline)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_and_guards() {
        let mut c = Connectivity::default();
        assert!(c.require_online().is_ok());

        c.set_offline();
        assert_eq!(c.state(), ConnectivityState::Offline);
        assert!(matches!(c.require_online(), Err(StoreError::Offline)));

        c.set_online();
        assert!(!c.is_offline());
    }
}
