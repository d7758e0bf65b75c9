use thiserror::Error;

pub mod clients;
pub mod connections;

pub use clients::{ClientManager, MemoryClientStore};
pub use connections::{ConnectionManager, MemoryConnectionStore};

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup by id found no entry
    #[error("no entry found for id {0:?}")]
    NotFound(String),
    /// Credential mismatch during client authentication
    #[error("invalid client credentials")]
    Unauthorized,
    /// Input rejected before touching the backing collection
    #[error("invalid input: {0}")]
    Invalid(String),
    /// Backend-specific failure; not raised by the memory backends
    #[error("storage backend failure: {0}")]
    #[allow(dead_code)]
    Backend(String),
}
