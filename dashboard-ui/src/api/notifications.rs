//! Notification actions

use gloo_net::http::Request;
use serde::Deserialize;
use shared_types::{ActionError, Notification};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Deserialize)]
struct ListNotificationsResponse {
    success: bool,
    #[serde(default)]
    notifications: Vec<Notification>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnreadCountResponse {
    success: bool,
    #[serde(default)]
    count: u32,
    error: Option<String>,
}

pub async fn list_notifications() -> Result<Vec<Notification>, ActionError> {
    let url = format!("{}/notifications", api_base());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListNotificationsResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.notifications)
}

/// Cheap polling endpoint for the shell badge.
pub async fn unread_count() -> Result<u32, ActionError> {
    let url = format!("{}/notifications/unread-count", api_base());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: UnreadCountResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.count)
}

pub async fn set_notification_read(id: &str, read: bool) -> Result<(), ActionError> {
    let url = format!("{}/notifications/{}/read", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "read": read }))
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

pub async fn mark_all_read() -> Result<(), ActionError> {
    let url = format!("{}/notifications/read-all", api_base());

    let response = Request::post(&url)
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
