//! Program actions

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, Program};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct CreateProgramRequest {
    pub academy_id: String,
    pub name: String,
    pub name_ar: String,
    pub description: Option<String>,
    pub capacity: u32,
    pub monthly_fee_minor: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProgramRequest {
    pub name: String,
    pub name_ar: String,
    pub description: Option<String>,
    pub capacity: u32,
    pub monthly_fee_minor: i64,
}

#[derive(Debug, Deserialize)]
struct ListProgramsResponse {
    success: bool,
    #[serde(default)]
    programs: Vec<Program>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProgramResponse {
    success: bool,
    program: Option<Program>,
    error: Option<String>,
}

fn unpack(data: ProgramResponse) -> Result<Program, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.program
        .ok_or_else(|| ActionError::Transport("Response missing program".to_string()))
}

pub async fn list_programs(academy_id: &str) -> Result<Vec<Program>, ActionError> {
    let url = format!("{}/programs?academy_id={}", api_base(), academy_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListProgramsResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.programs)
}

pub async fn create_program(request: &CreateProgramRequest) -> Result<Program, ActionError> {
    let url = format!("{}/programs", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ProgramResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn update_program(id: &str, request: &UpdateProgramRequest) -> Result<Program, ActionError> {
    let url = format!("{}/programs/{}", api_base(), id);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ProgramResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn set_program_archived(id: &str, archived: bool) -> Result<Program, ActionError> {
    let url = format!("{}/programs/{}/archive", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "archived": archived }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ProgramResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_program(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/programs/{}/delete", api_base(), id);

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
