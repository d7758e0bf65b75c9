pub mod create;
pub mod delete;
pub mod find;
pub mod get;

use crate::api::authn_middleware::AuthenticatedClient;
use crate::openapi::CONNECTIONS_TAG;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::{get as get_route, post};
use axum::{Extension, Router};
use serde::Deserialize;

/// Combines all connection-management routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth2/connections", post(dispatch_handler))
        .route(
            "/oauth2/connections/{id}",
            get_route(get::get_handler).delete(delete::delete_handler),
        )
}

/// Query parameters steering the combined POST endpoint
#[derive(Debug, Deserialize)]
pub(super) struct DispatchParams {
    local: Option<String>,
    remote: Option<String>,
    provider: Option<String>,
}

/// Combined endpoint for creating and looking up connections.
///
/// Query-parameter presence is the only dispatch signal available to
/// callers, checked in fixed precedence: `local` without `remote` selects
/// the local-subject search; `remote` plus `provider` selects the
/// remote-subject search; any other parameter combination falls back to a
/// lookup (with an empty id, which cannot succeed); a request carrying no
/// dispatch parameters at all is a create.
#[utoipa::path(
    post,
    path = "/oauth2/connections",
    tag = CONNECTIONS_TAG,
    request_body = create::CreateConnectionRequest,
    params(
        ("local" = Option<String>, Query, description = "Local subject to search connections for"),
        ("remote" = Option<String>, Query, description = "Remote subject selector; requires provider"),
        ("provider" = Option<String>, Query, description = "Remote identity provider"),
    ),
    responses(
        (status = 200, description = "Search results", body = [crate::models::Connection]),
        (status = 201, description = "Connection created", body = crate::models::Connection),
        (status = 400, description = "Malformed or invalid payload"),
        (status = 401, description = "Missing or invalid client credentials"),
        (status = 403, description = "Denied by policy"),
        (status = 404, description = "No connection under the requested id")
    )
)]
async fn dispatch_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedClient>,
    Query(params): Query<DispatchParams>,
    body: Bytes,
) -> Response {
    let local = params.local.as_deref().filter(|value| !value.is_empty());
    let remote = params.remote.as_deref().filter(|value| !value.is_empty());
    let provider = params.provider.as_deref().filter(|value| !value.is_empty());

    if local.is_some() && remote.is_none() {
        return find::find_local(&state, &caller, local.unwrap_or_default()).await;
    }

    if remote.is_some() && provider.is_some() {
        return find::find_remote(
            &state,
            &caller,
            provider.unwrap_or_default(),
            local.unwrap_or_default(),
        )
        .await;
    }

    if local.is_none() && remote.is_none() && provider.is_none() {
        return create::create(&state, &caller, body).await;
    }

    get::fetch(&state, &caller, "").await
}
