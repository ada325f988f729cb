//! HTTP client for the AcademyOS actions backend
//!
//! Every action answers with the same envelope: `{ success: true, ...payload }`
//! on the happy path, `{ success: false, error?: string }` when the server
//! says no. Transport failures (network, non-2xx, undecodable body) never
//! carry a display-ready message; they map to `ActionError::Transport` and
//! the screens fall back to a generic line.

use serde::Deserialize;
use shared_types::ActionError;
use std::sync::OnceLock;

pub mod academies;
pub mod attendance;
pub mod courses;
pub mod messaging;
pub mod notifications;
pub mod payments;
pub mod players;
pub mod preferences;
pub mod programs;
pub mod session_plans;

/// Get the API base URL based on current environment
/// - In development (localhost): use http://localhost:8080
/// - In production: use same origin (API serves static files)
fn get_api_base() -> String {
    // Get the current hostname from the browser
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    // If running on localhost, point to the API server on port 8080
    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:8080".to_string()
    } else {
        // In production, use same origin
        "".to_string()
    }
}

/// Lazy-static equivalent for WASM - computed at first use
static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Bare acknowledgement envelope for actions that return no payload
#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Map a `success: false` envelope to the rejection the user will see.
pub(crate) fn rejection(error: Option<String>) -> ActionError {
    ActionError::Rejected(error.unwrap_or_else(|| "Request rejected".to_string()))
}

pub(crate) async fn describe_http_error(response: gloo_net::http::Response) -> ActionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        return ActionError::Transport(format!("HTTP error: {status}"));
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
            return ActionError::Transport(format!("HTTP error: {status} ({error})"));
        }
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return ActionError::Transport(format!("HTTP error: {status} ({message})"));
        }
    }

    ActionError::Transport(format!("HTTP error: {status} ({body})"))
}
