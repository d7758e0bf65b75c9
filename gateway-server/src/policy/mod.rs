use crate::state::AppState;
use http::StatusCode;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scope a caller's credential must be entitled to for the connections API
pub const CONNECTIONS_SCOPE: &str = "connections";

/// Resource identifier covering the connections collection
pub const CONNECTIONS_RESOURCE: &str = "connections";

/// Resource identifier for a single connection
pub fn connection_resource(id: &str) -> String {
    format!("connection:{id}")
}

/// One authorization question put to the policy decision point.
///
/// Built per call from a resource-identifier template plus the target id;
/// lives only for the duration of a single decision.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PolicyRequest {
    /// Resource identifier the action targets
    pub resource: String,
    /// Action verb, matching the handler operation
    pub action: String,
    /// API-surface scope required of the caller's credential
    pub scope: String,
    /// Authenticated caller the decision is evaluated for
    pub subject: String,
}

/// A generic wrapper for decision requests, wrapping the input data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecisionRequest<T> {
    pub input: T,
}

/// A generic wrapper for decision responses, wrapping the result data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecisionResponse<T> {
    pub result: T,
}

/// The decision returned by the policy decision point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PolicyDecision {
    /// Whether the action is allowed
    pub allow: bool,
    /// Denial reason, when the policy supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Errors that can occur while obtaining a policy decision
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("{0}")]
    Denied(String),
    #[error("failed to send request to the policy decision point: {0}")]
    Request(#[from] reqwest::Error),
    #[error("policy decision point request failed with status: {0}")]
    InvalidStatus(StatusCode),
    #[error("failed to parse policy decision: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ask the policy decision point whether `subject` may perform `action` on
/// `resource` under the connections scope.
///
/// Anything but an explicit allow aborts the operation: a denial, a
/// transport failure, and an evaluation error are all surfaced before any
/// side effect happens.
pub async fn authorize(
    state: &AppState,
    subject: &str,
    resource: String,
    action: &str,
) -> Result<(), DecisionError> {
    let request = PolicyRequest {
        resource,
        action: action.to_string(),
        scope: CONNECTIONS_SCOPE.to_string(),
        subject: subject.to_string(),
    };

    let decision = send_decision_request(state, &request).await?;
    if !decision.allow {
        let reason = decision
            .reason
            .unwrap_or_else(|| "request denied by policy".to_string());
        return Err(DecisionError::Denied(reason));
    }

    Ok(())
}

/// POST the wrapped policy request to the decision endpoint
async fn send_decision_request(
    state: &AppState,
    request: &PolicyRequest,
) -> Result<PolicyDecision, DecisionError> {
    let decision_url = format!("{}/v1/decision", state.config.policy.url.trim_end_matches('/'));
    debug!("Requesting policy decision at: {}", decision_url);

    let response = state
        .policy_client
        .post(&decision_url)
        .json(&DecisionRequest { input: request })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(DecisionError::InvalidStatus(response.status()));
    }

    let body = response.bytes().await?;
    let decision: DecisionResponse<PolicyDecision> = serde_json::from_slice(&body)?;
    Ok(decision.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_resource_template() {
        assert_eq!(connection_resource("c1"), "connection:c1");
        assert_eq!(connection_resource(""), "connection:");
    }

    #[test]
    fn test_decision_request_wire_format() {
        let request = DecisionRequest {
            input: PolicyRequest {
                resource: connection_resource("c1"),
                action: "get".to_string(),
                scope: CONNECTIONS_SCOPE.to_string(),
                subject: "client1".to_string(),
            },
        };

        let wire = serde_json::to_value(request).expect("Failed to serialize decision request");
        assert_eq!(
            wire,
            json!({
                "input": {
                    "resource": "connection:c1",
                    "action": "get",
                    "scope": "connections",
                    "subject": "client1",
                }
            })
        );
    }

    #[test]
    fn test_decision_response_reason_is_optional() {
        let decision: DecisionResponse<PolicyDecision> =
            serde_json::from_value(json!({"result": {"allow": true}}))
                .expect("Failed to parse decision");
        assert!(decision.result.allow);
        assert_eq!(decision.result.reason, None);

        let denied: DecisionResponse<PolicyDecision> = serde_json::from_value(
            json!({"result": {"allow": false, "reason": "scope missing"}}),
        )
        .expect("Failed to parse decision");
        assert!(!denied.result.allow);
        assert_eq!(denied.result.reason.as_deref(), Some("scope missing"));
    }
}
