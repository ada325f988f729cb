//! Academy actions

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{Academy, ActionError};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct CreateAcademyRequest {
    pub name: String,
    pub name_ar: String,
    pub slug: Option<String>,
    pub city: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAcademyRequest {
    pub name: String,
    pub name_ar: String,
    pub slug: Option<String>,
    pub city: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListAcademiesResponse {
    success: bool,
    #[serde(default)]
    academies: Vec<Academy>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AcademyResponse {
    success: bool,
    academy: Option<Academy>,
    error: Option<String>,
}

fn unpack(data: AcademyResponse) -> Result<Academy, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.academy
        .ok_or_else(|| ActionError::Transport("Response missing academy".to_string()))
}

pub async fn list_academies() -> Result<Vec<Academy>, ActionError> {
    let url = format!("{}/academies", api_base());

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListAcademiesResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.academies)
}

pub async fn create_academy(request: &CreateAcademyRequest) -> Result<Academy, ActionError> {
    let url = format!("{}/academies", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: AcademyResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn update_academy(id: &str, request: &UpdateAcademyRequest) -> Result<Academy, ActionError> {
    let url = format!("{}/academies/{}", api_base(), id);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: AcademyResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

/// Flip the archived flag. Returns the academy as the server now sees it.
pub async fn set_academy_archived(id: &str, archived: bool) -> Result<Academy, ActionError> {
    let url = format!("{}/academies/{}/archive", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "archived": archived }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: AcademyResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_academy(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/academies/{}/delete", api_base(), id);

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
