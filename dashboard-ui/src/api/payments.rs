//! Payment actions

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use shared_types::{ActionError, Payment, PaymentMethod, PaymentStatus};

use super::{api_base, describe_http_error, rejection, AckResponse};

#[derive(Debug, Clone, Serialize)]
pub struct RecordPaymentRequest {
    pub academy_id: String,
    pub player_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub method: Option<PaymentMethod>,
    pub due_date: NaiveDate,
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListPaymentsResponse {
    success: bool,
    #[serde(default)]
    payments: Vec<Payment>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    success: bool,
    payment: Option<Payment>,
    error: Option<String>,
}

fn unpack(data: PaymentResponse) -> Result<Payment, ActionError> {
    if !data.success {
        return Err(rejection(data.error));
    }
    data.payment
        .ok_or_else(|| ActionError::Transport("Response missing payment".to_string()))
}

pub async fn list_payments(academy_id: &str) -> Result<Vec<Payment>, ActionError> {
    let url = format!("{}/payments?academy_id={}", api_base(), academy_id);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: ListPaymentsResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    if !data.success {
        return Err(rejection(data.error));
    }

    Ok(data.payments)
}

pub async fn record_payment(request: &RecordPaymentRequest) -> Result<Payment, ActionError> {
    let url = format!("{}/payments", api_base());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: PaymentResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

/// Move a payment through its lifecycle (pending, paid, overdue, refunded).
pub async fn update_payment_status(id: &str, status: PaymentStatus) -> Result<Payment, ActionError> {
    let url = format!("{}/payments/{}/status", api_base(), id);

    let response = Request::post(&url)
        .json(&serde_json::json!({ "status": status }))
        .map_err(|e| ActionError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await
        .map_err(|e| ActionError::Transport(format!("Request failed: {e}")))?;

    if !response.ok() {
        return Err(describe_http_error(response).await);
    }

    let data: PaymentResponse = response
        .json()
        .await
        .map_err(|e| ActionError::Transport(format!("Failed to parse JSON: {e}")))?;

    unpack(data)
}

pub async fn delete_payment(id: &str) -> Result<(), ActionError> {
    let url = format!("{}/payments/{}/delete", api_base(), id);

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
