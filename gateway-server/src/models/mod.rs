use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered OAuth2 client application.
///
/// The secret is stored as an opaque hash; hashing happens upstream and the
/// store only ever compares the byte sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Unique identifier for the client, generated at creation when empty
    pub id: String,
    /// Hashed client secret
    pub hashed_secret: Vec<u8>,
}

/// A federated-login binding between a local subject and a subject asserted
/// by a remote identity provider.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Connection {
    /// Unique identifier, assigned by the server at creation and immutable
    #[serde(default)]
    pub id: String,
    /// Identifier of the local principal
    pub local_subject: String,
    /// Identifier of the principal as known to the remote provider
    pub remote_subject: String,
    /// Identifier of the remote identity provider
    pub provider: String,
}
