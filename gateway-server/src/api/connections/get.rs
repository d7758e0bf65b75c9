use crate::api::authn_middleware::AuthenticatedClient;
use crate::errors::ApiError;
use crate::openapi::CONNECTIONS_TAG;
use crate::policy;
use crate::state::AppState;
use crate::store::ConnectionManager;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

/// Fetch a single connection by id
#[utoipa::path(
    get,
    path = "/oauth2/connections/{id}",
    tag = CONNECTIONS_TAG,
    params(
        ("id" = String, Path, description = "Connection identifier"),
    ),
    responses(
        (status = 200, description = "The requested connection", body = crate::models::Connection),
        (status = 401, description = "Missing or invalid client credentials"),
        (status = 403, description = "Denied by policy"),
        (status = 404, description = "No connection under the requested id")
    )
)]
pub(super) async fn get_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedClient>,
    Path(id): Path<String>,
) -> Response {
    fetch(&state, &caller, &id).await
}

/// Authorize against the item resource, then look the connection up.
pub(super) async fn fetch(state: &AppState, caller: &AuthenticatedClient, id: &str) -> Response {
    if let Err(err) =
        policy::authorize(state, &caller.id, policy::connection_resource(id), "get").await
    {
        return ApiError::from(err).into_response();
    }

    match state.connections.get(id).await {
        Ok(connection) => Json(connection).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
