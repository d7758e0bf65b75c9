use crate::api::authn_middleware::AuthenticatedClient;
use crate::errors::ApiError;
use crate::openapi::CONNECTIONS_TAG;
use crate::policy;
use crate::state::AppState;
use crate::store::ConnectionManager;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Extension;

/// Remove a connection by id
#[utoipa::path(
    delete,
    path = "/oauth2/connections/{id}",
    tag = CONNECTIONS_TAG,
    params(
        ("id" = String, Path, description = "Connection identifier"),
    ),
    responses(
        (status = 202, description = "Connection removed"),
        (status = 401, description = "Missing or invalid client credentials"),
        (status = 403, description = "Denied by policy"),
        (status = 404, description = "No connection under the requested id")
    )
)]
pub(super) async fn delete_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedClient>,
    Path(id): Path<String>,
) -> Response {
    if let Err(err) =
        policy::authorize(&state, &caller.id, policy::connection_resource(&id), "delete").await
    {
        return ApiError::from(err).into_response();
    }

    if let Err(err) = state.connections.delete(&id).await {
        return ApiError::from(err).into_response();
    }

    StatusCode::ACCEPTED.into_response()
}
