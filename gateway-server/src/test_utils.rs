use crate::config::GatewayConfig;
use crate::create_app;
use crate::models::Client;
use crate::state::AppState;
use crate::store::ClientManager;
use axum::body::Body;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

/// Client credentials seeded into every fixture's client store.
pub const TEST_CLIENT_ID: &str = "test-client";
pub const TEST_CLIENT_SECRET: &str = "test-secret";

/// Test fixture for exercising API endpoints against a mocked policy
/// decision point.
///
/// The fixture starts a wiremock server standing in for the PDP, seeds one
/// known client into the client store, and drives the real router through
/// `tower::ServiceExt::oneshot`. Requests built with the convenience helpers
/// carry the seeded client's Basic credentials; build a raw `Request` and
/// pass it to [`TestFixture::send`] to test unauthenticated behavior.
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Shared application state, handy for seeding and inspecting the stores
    pub state: AppState,
    /// Mock server standing in for the policy decision point
    pub policy_mock: MockServer,
}

impl TestFixture {
    /// Creates a new test fixture with a mocked policy decision point.
    pub async fn new() -> Self {
        // Initialize test logger
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let policy_mock = MockServer::start().await;
        let config = GatewayConfig::for_test_with_mocks(&policy_mock);
        let state = AppState::new(config);

        state
            .clients
            .create_client(Client {
                id: TEST_CLIENT_ID.to_string(),
                hashed_secret: TEST_CLIENT_SECRET.as_bytes().to_vec(),
            })
            .await
            .expect("Failed to seed test client");

        let app = create_app(state.clone()).await;

        Self {
            app,
            state,
            policy_mock,
        }
    }

    /// Mount an allow-everything decision on the policy mock.
    pub async fn allow_policy(&self) {
        self.mock_decision(serde_json::json!({"result": {"allow": true}}))
            .await;
    }

    /// Mount a deny decision carrying the given reason.
    pub async fn deny_policy(&self, reason: &str) {
        self.mock_decision(serde_json::json!({"result": {"allow": false, "reason": reason}}))
            .await;
    }

    /// Mount an arbitrary decision body on the policy mock.
    pub async fn mock_decision(&self, body: Value) {
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/decision"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.policy_mock)
            .await;
    }

    /// Creates a request builder carrying the seeded client's credentials.
    pub fn request_builder(&self, method: Method, uri: impl AsRef<str>) -> http::request::Builder {
        let credentials = STANDARD.encode(format!("{TEST_CLIENT_ID}:{TEST_CLIENT_SECRET}"));

        Request::builder()
            .method(method)
            .uri(uri.as_ref())
            .header("Authorization", format!("Basic {credentials}"))
            .header("Content-Type", "application/json")
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a JSON body to the specified URI.
    pub async fn post<T: Serialize>(&self, uri: impl AsRef<str>, body: &T) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::POST, uri)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a raw (possibly malformed) body.
    pub async fn post_raw(&self, uri: impl AsRef<str>, body: &str) -> TestResponse {
        let request = self
            .request_builder(Method::POST, uri)
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a DELETE request to the specified URI.
    pub async fn delete(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::DELETE, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to an empty object for empty or
        // non-JSON bodies
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse {
            status,
            headers,
            json,
        }
    }
}

/// Response from a test request with convenient access to status, headers
/// and JSON body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Converts the response body to the specified type.
    ///
    /// # Panics
    ///
    /// Panics if deserialization fails.
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
