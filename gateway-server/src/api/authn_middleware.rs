use crate::errors::ApiError;
use crate::state::AppState;
use crate::store::ClientManager;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use log::warn;

/// Identity of the client that authenticated the current request.
///
/// Inserted as a request extension and consumed by the policy gateway as
/// the decision subject.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedClient {
    pub id: String,
}

/// Authenticates every request against the client store before it reaches a
/// handler.
///
/// Credentials arrive as `Authorization: Basic <base64(id:secret)>`. Any
/// failure — missing header, undecodable credentials, unknown client, wrong
/// secret — yields the same 401 response, so the HTTP boundary does not
/// reveal which part was wrong.
pub(crate) async fn authentication_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = match authenticate_request(&state, request.headers()).await {
        Ok(caller) => caller,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

async fn authenticate_request(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedClient, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(invalid_credentials)?;

    let encoded = header
        .strip_prefix("Basic ")
        .ok_or_else(invalid_credentials)?;
    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| invalid_credentials())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid_credentials())?;
    let (id, secret) = decoded.split_once(':').ok_or_else(invalid_credentials)?;

    match state.clients.authenticate(id, secret.as_bytes()).await {
        Ok(client) => Ok(AuthenticatedClient { id: client.id }),
        Err(err) => {
            warn!("Client authentication failed: {}", err);
            Err(invalid_credentials())
        }
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("invalid client credentials")
}
