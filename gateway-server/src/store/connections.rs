use super::StoreError;
use crate::models::Connection;
use async_trait::async_trait;
use dashmap::DashMap;

/// Storage contract for federated-identity connections.
///
/// The request handlers depend only on this trait, so memory and persistent
/// backends are interchangeable. Implementations must be thread-safe; each
/// operation is atomic in isolation and no cross-operation transactions are
/// provided.
#[async_trait]
pub trait ConnectionManager: Send + Sync + 'static {
    /// Persist a new connection. The caller has already assigned the id.
    async fn create(&self, connection: Connection) -> Result<(), StoreError>;

    /// Look up a connection by id.
    async fn get(&self, id: &str) -> Result<Connection, StoreError>;

    /// All connections for a local subject, in arbitrary order.
    ///
    /// An unknown subject yields an empty result set, not an error.
    async fn find_all_by_local_subject(
        &self,
        local_subject: &str,
    ) -> Result<Vec<Connection>, StoreError>;

    /// Connections matching both the provider and the local subject.
    ///
    /// The result set may be empty; that is not an error.
    async fn find_by_remote_subject(
        &self,
        provider: &str,
        local_subject: &str,
    ) -> Result<Vec<Connection>, StoreError>;

    /// Remove a connection.
    ///
    /// Unlike client deletion this fails `NotFound` for an unknown id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// In-memory connection store keyed by connection id, process-lifetime only.
#[derive(Default)]
pub struct MemoryConnectionStore {
    connections: DashMap<String, Connection>,
}

impl MemoryConnectionStore {
    /// Create an empty connection store.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }
}

#[async_trait]
impl ConnectionManager for MemoryConnectionStore {
    async fn create(&self, connection: Connection) -> Result<(), StoreError> {
        if connection.id.is_empty() {
            return Err(StoreError::Invalid(
                "connection id must be assigned before create".to_string(),
            ));
        }

        self.connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Connection, StoreError> {
        self.connections
            .get(id)
            .map(|entry| entry.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn find_all_by_local_subject(
        &self,
        local_subject: &str,
    ) -> Result<Vec<Connection>, StoreError> {
        Ok(self
            .connections
            .iter()
            .filter(|entry| entry.value().local_subject == local_subject)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_remote_subject(
        &self,
        provider: &str,
        local_subject: &str,
    ) -> Result<Vec<Connection>, StoreError> {
        Ok(self
            .connections
            .iter()
            .filter(|entry| {
                entry.value().provider == provider && entry.value().local_subject == local_subject
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.connections
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
