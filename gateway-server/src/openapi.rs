use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const CONNECTIONS_TAG: &str = "Connections API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = CONNECTIONS_TAG, description = "Policy-gated management of federated-login connections"),
    ),
    info(
        title = "OAuth2 Access-Control Gateway API",
        description = "Access-control gateway fronting OAuth2 clients and federated connections",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
