//! Session plan actions
//!
//! Bulk creation is a single action call. The server persists all drafts or
//! none of them; a partial write never comes back.

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, SessionPlan};

use super::{api_base, describe_http_error, rejection, AckResponse};

/// Unsaved plan produced by the schedule generator on the courses screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPlanDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub duration_min: u32,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSessionPlanRequest {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub duration_min: u32,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
struct BulkCreateRequest<'a> {
    course_id: &'a str,
    plans: &'a [SessionPlanDraft],
}

#[derive(Debug, Deserialize)]
struct ListSessionPlansResponse {
    success: bool,
    #[serde(default)]
    session_plans: Vec<SessionPlan>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionPlanResponse {
    success: bool,
    session_plan: Option<SessionPlan>,
    error: Option<String>,
}

fn unpack(data: SessionPlanResponse) -> Result<SessionPlan, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.session_plan
        .ok_or_else(|| ActionError::Transport("Response missing session plan".to_string()))
}

pub async fn list_session_plans(course_id: &str) -> Result<Vec<SessionPlan>, ActionError> {
    let url = format!("{}/session-plans?course_id={}", api_base(), course_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListSessionPlansResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.session_plans)
}

pub async fn create_session_plans(
    course_id: &str,
    plans: &[SessionPlanDraft],
) -> Result<Vec<SessionPlan>, ActionError> {
    let url = format!("{}/session-plans/bulk", api_base());
    let request = BulkCreateRequest { course_id, plans };

    let response = Request::post(&url)
        .json(&request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListSessionPlansResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.session_plans)
}

pub async fn update_session_plan(
    id: &str,
    request: &UpdateSessionPlanRequest,
) -> Result<SessionPlan, ActionError> {
    let url = format!("{}/session-plans/{}", api_base(), id);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: SessionPlanResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn set_session_plan_completed(id: &str, completed: bool) -> Result<SessionPlan, ActionError> {
    let url = format!("{}/session-plans/{}/completed", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "completed": completed }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: SessionPlanResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_session_plan(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/session-plans/{}/delete", api_base(), id);

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
