//! Player roster actions

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, Player};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlayerRequest {
    pub academy_id: String,
    pub program_id: Option<String>,
    pub name: String,
    pub name_ar: String,
    pub guardian_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePlayerRequest {
    pub program_id: Option<String>,
    pub name: String,
    pub name_ar: String,
    pub guardian_phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ListPlayersResponse {
    success: bool,
    #[serde(default)]
    players: Vec<Player>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    success: bool,
    player: Option<Player>,
    error: Option<String>,
}

fn unpack(data: PlayerResponse) -> Result<Player, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.player
        .ok_or_else(|| ActionError::Transport("Response missing player".to_string()))
}

pub async fn list_players(academy_id: &str) -> Result<Vec<Player>, ActionError> {
    let url = format!("{}/players?academy_id={}", api_base(), academy_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListPlayersResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.players)
}

/// Roster of one course, for the attendance sheet.
pub async fn list_course_roster(course_id: &str) -> Result<Vec<Player>, ActionError> {
    let url = format!("{}/players?course_id={}", api_base(), course_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListPlayersResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.players)
}

pub async fn create_player(request: &CreatePlayerRequest) -> Result<Player, ActionError> {
    let url = format!("{}/players", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: PlayerResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn update_player(id: &str, request: &UpdatePlayerRequest) -> Result<Player, ActionError> {
    let url = format!("{}/players/{}", api_base(), id);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: PlayerResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn set_player_archived(id: &str, archived: bool) -> Result<Player, ActionError> {
    let url = format!("{}/players/{}/archive", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "archived": archived }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: PlayerResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_player(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/players/{}/delete", api_base(), id);

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
