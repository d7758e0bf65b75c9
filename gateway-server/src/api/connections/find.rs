use crate::api::authn_middleware::AuthenticatedClient;
use crate::errors::ApiError;
use crate::policy::{self, CONNECTIONS_RESOURCE};
use crate::state::AppState;
use crate::store::ConnectionManager;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Search connections by local subject.
pub(super) async fn find_local(
    state: &AppState,
    caller: &AuthenticatedClient,
    local: &str,
) -> Response {
    if let Err(err) =
        policy::authorize(state, &caller.id, CONNECTIONS_RESOURCE.to_string(), "find").await
    {
        return ApiError::from(err).into_response();
    }

    match state.connections.find_all_by_local_subject(local).await {
        Ok(connections) => Json(connections).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Search connections by provider, scoped to the requested local subject.
pub(super) async fn find_remote(
    state: &AppState,
    caller: &AuthenticatedClient,
    provider: &str,
    local: &str,
) -> Response {
    if let Err(err) =
        policy::authorize(state, &caller.id, CONNECTIONS_RESOURCE.to_string(), "find").await
    {
        return ApiError::from(err).into_response();
    }

    match state.connections.find_by_remote_subject(provider, local).await {
        Ok(connections) => Json(connections).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
