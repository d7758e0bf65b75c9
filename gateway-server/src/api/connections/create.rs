use crate::api::authn_middleware::AuthenticatedClient;
use crate::errors::ApiError;
use crate::models::Connection;
use crate::policy::{self, CONNECTIONS_RESOURCE};
use crate::state::AppState;
use crate::store::ConnectionManager;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Payload for registering a new connection
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateConnectionRequest {
    /// Identifier of the local principal
    pub local_subject: String,
    /// Identifier of the principal as known to the remote provider
    pub remote_subject: String,
    /// Identifier of the remote identity provider
    pub provider: String,
}

impl CreateConnectionRequest {
    /// Field-level validation, reporting the first violation.
    fn validate(&self) -> Result<(), &'static str> {
        if self.local_subject.is_empty() {
            return Err("local_subject must not be empty");
        }
        if self.remote_subject.is_empty() {
            return Err("remote_subject must not be empty");
        }
        if self.provider.is_empty() {
            return Err("provider must not be empty");
        }
        Ok(())
    }
}

/// Create a connection.
///
/// The target does not exist yet, so authorization is checked against the
/// collection resource — and strictly before the payload is decoded.
pub(super) async fn create(
    state: &AppState,
    caller: &AuthenticatedClient,
    body: Bytes,
) -> Response {
    if let Err(err) =
        policy::authorize(state, &caller.id, CONNECTIONS_RESOURCE.to_string(), "create").await
    {
        return ApiError::from(err).into_response();
    }

    let request: CreateConnectionRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            return ApiError::bad_request(format!("invalid connection payload: {err}"))
                .into_response()
        }
    };

    if let Err(violation) = request.validate() {
        return ApiError::bad_request(violation).into_response();
    }

    let connection = Connection {
        id: Uuid::new_v4().to_string(),
        local_subject: request.local_subject,
        remote_subject: request.remote_subject,
        provider: request.provider,
    };

    if let Err(err) = state.connections.create(connection.clone()).await {
        return ApiError::from(err).into_response();
    }

    let location = format!("connections/{}", connection.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(connection),
    )
        .into_response()
}
