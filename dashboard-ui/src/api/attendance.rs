//! Attendance actions
//!
//! The sheet is keyed by (course, date). Saving is a bulk upsert of the
//! marks the user touched since the last flush; untouched rows are not
//! sent and the server leaves them alone.

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, AttendanceRecord, AttendanceStatus};

use super::{api_base, describe_http_error, rejection};

/// One touched cell in the sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceMark {
    pub player_id: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
struct SaveAttendanceRequest<'a> {
    course_id: &'a str,
    date: NaiveDate,
    marks: &'a [AttendanceMark],
}

#[derive(Debug, Deserialize)]
struct AttendanceResponse {
    success: bool,
    #[serde(default)]
    records: Vec<AttendanceRecord>,
    error: Option<String>,
}

pub async fn get_attendance(
    course_id: &str,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, ActionError> {
    let url = format!(
        "{}/attendance?course_id={}&date={}",
        api_base(),
        course_id,
        date
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: AttendanceResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.records)
}

/// Upsert the touched marks. Returns the records as persisted so the
/// sheet can reconcile ids for rows that were new.
pub async fn save_attendance(
    course_id: &str,
    date: NaiveDate,
    marks: &[AttendanceMark],
) -> Result<Vec<AttendanceRecord>, ActionError> {
    let url = format!("{}/attendance/save", api_base());
    let request = SaveAttendanceRequest {
        course_id,
        date,
        marks,
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

    let data: AttendanceResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.records)
}
