use thiserror::Error;

use jewelbill_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operation error.
///
/// These are infrastructure errors (connectivity, backends, encoding) as
/// opposed to domain errors, which are wrapped unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("client is offline; operation requires a connection")]
    Offline,

    #[error("remote store error: {0}")]
    Remote(String),

    #[error("local storage error: {0}")]
    Backend(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
