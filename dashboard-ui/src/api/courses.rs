//! Course actions

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, Course};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct CreateCourseRequest {
    pub academy_id: String,
    pub program_id: String,
    pub name: String,
    pub name_ar: String,
    pub coach: Option<String>,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCourseRequest {
    pub name: String,
    pub name_ar: String,
    pub coach: Option<String>,
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ListCoursesResponse {
    success: bool,
    #[serde(default)]
    courses: Vec<Course>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CourseResponse {
    success: bool,
    course: Option<Course>,
    error: Option<String>,
}

fn unpack(data: CourseResponse) -> Result<Course, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.course
        .ok_or_else(|| ActionError::Transport("Response missing course".to_string()))
}

pub async fn list_courses(program_id: &str) -> Result<Vec<Course>, ActionError> {
    let url = format!("{}/courses?program_id={}", api_base(), program_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListCoursesResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.courses)
}

pub async fn create_course(request: &CreateCourseRequest) -> Result<Course, ActionError> {
    let url = format!("{}/courses", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: CourseResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn update_course(id: &str, request: &UpdateCourseRequest) -> Result<Course, ActionError> {
    let url = format!("{}/courses/{}", api_base(), id);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: CourseResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn set_course_archived(id: &str, archived: bool) -> Result<Course, ActionError> {
    let url = format!("{}/courses/{}/archive", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "archived": archived }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: CourseResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_course(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/courses/{}/delete", api_base(), id);

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
