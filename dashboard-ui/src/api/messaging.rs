//! Messaging actions

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, Conversation, Message};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    conversation_id: &'a str,
    body: &'a str,
    /// Client-generated, lets the server dedupe a retried send
    client_ref: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListConversationsResponse {
    success: bool,
    #[serde(default)]
    conversations: Vec<Conversation>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListMessagesResponse {
    success: bool,
    #[serde(default)]
    messages: Vec<Message>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    success: bool,
    message: Option<Message>,
    error: Option<String>,
}

pub async fn list_conversations(academy_id: &str) -> Result<Vec<Conversation>, ActionError> {
    let url = format!("{}/conversations?academy_id={}", api_base(), academy_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListConversationsResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.conversations)
}

pub async fn fetch_messages(conversation_id: &str) -> Result<Vec<Message>, ActionError> {
    let url = format!("{}/conversations/{}/messages", api_base(), conversation_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListMessagesResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.messages)
}

/// Send one message. The returned message is the persisted row, used to
/// replace the optimistic bubble with the same client_ref.
pub async fn send_message(
    conversation_id: &str,
    body: &str,
    client_ref: &str,
) -> Result<Message, ActionError> {
    let url = format!("{}/messages/send", api_base());
    let request = SendMessageRequest {
        conversation_id,
        body,
        client_ref,
    };

    let response = Request::post(&url)
        .json(&request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: MessageResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    data.message
        .ok_or_else(|| ActionError::Transport("Response missing message".to_string()))
}

pub async fn mark_conversation_read(conversation_id: &str) -> Result<(), ActionError> {
    let url = format!("{}/conversations/{}/read", api_base(), conversation_id);

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
