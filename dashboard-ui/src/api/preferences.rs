//! User preference actions
//!
//! Preferences live in localStorage first; the server copy only makes them
//! follow the user across devices. Saving is fire-and-forget from the
//! settings screen.

use gloo_net::http::Request;
use serde::Serialize;
use shared_types::ActionError;

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct SavePreferencesRequest {
    pub locale: String,
    pub theme: String,
}

pub async fn save_preferences(request: &SavePreferencesRequest) -> Result<(), ActionError> {
    let url = format!("{}/preferences", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: AckResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(())
}
