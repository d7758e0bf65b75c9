use super::StoreError;
use crate::models::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Storage contract for registered OAuth2 clients.
///
/// Implementations must be thread-safe (Send + Sync); every operation is a
/// single atomic access to the backing collection, and no internal lock is
/// held across calls to other components.
#[async_trait]
pub trait ClientManager: Send + Sync + 'static {
    /// Look up a client by id.
    async fn get_client(&self, id: &str) -> Result<Client, StoreError>;

    /// Authenticate a client by id and secret.
    ///
    /// The existence check runs first: an unknown id fails `NotFound` before
    /// the secret is ever inspected. The secret comparison is constant-time
    /// over the full byte sequence.
    async fn authenticate(&self, id: &str, secret: &[u8]) -> Result<Client, StoreError>;

    /// Register a client.
    ///
    /// An empty id is replaced with a generated one; an existing entry under
    /// the same id is overwritten (last write wins). Returns the stored
    /// client with its id populated.
    async fn create_client(&self, client: Client) -> Result<Client, StoreError>;

    /// Remove a client. Idempotent: deleting an unknown id is not an error.
    async fn delete_client(&self, id: &str) -> Result<(), StoreError>;
}

/// In-memory client registry keyed by client id, process-lifetime only.
#[derive(Default)]
pub struct MemoryClientStore {
    clients: DashMap<String, Client>,
}

impl MemoryClientStore {
    /// Create an empty client store.
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }
}

#[async_trait]
impl ClientManager for MemoryClientStore {
    async fn get_client(&self, id: &str) -> Result<Client, StoreError> {
        self.clients
            .get(id)
            .map(|entry| entry.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn authenticate(&self, id: &str, secret: &[u8]) -> Result<Client, StoreError> {
        let client = self.get_client(id).await?;

        if !bool::from(client.hashed_secret.ct_eq(secret)) {
            return Err(StoreError::Unauthorized);
        }

        Ok(client)
    }

    async fn create_client(&self, mut client: Client) -> Result<Client, StoreError> {
        if client.id.is_empty() {
            client.id = Uuid::new_v4().to_string();
        }

        self.clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn delete_client(&self, id: &str) -> Result<(), StoreError> {
        self.clients.remove(id);
        Ok(())
    }
}
