//! HTTP route handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use relay_core::types::{audit_key_prefix, Notification};
use relay_core::{Error, HISTORY_LIMIT, SERVICE_NAME};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::server::AppState;

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": Utc::now(),
    }))
}

#[derive(Debug, Deserialize)]
struct EmailRequest {
    to: String,
    subject: String,
    body: String,
}

#[derive(Debug, Deserialize)]
struct SmsRequest {
    to: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct PushRequest {
    user_id: String,
    title: String,
    body: String,
    data: Option<Value>,
}

/// POST /api/notifications/send — manual notification sending
pub async fn send_notification(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let kind = body
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("email")
        .to_string();

    let result = match kind.as_str() {
        "email" => match parse::<EmailRequest>(body) {
            Ok(req) => state.producer.send_email(&req.to, &req.subject, &req.body).await,
            Err(e) => Err(e),
        },
        "sms" => match parse::<SmsRequest>(body) {
            Ok(req) => state.producer.send_sms(&req.to, &req.message).await,
            Err(e) => Err(e),
        },
        "push" => match parse::<PushRequest>(body) {
            Ok(req) => {
                state
                    .producer
                    .send_push(&req.user_id, &req.title, &req.body, req.data)
                    .await
            }
            Err(e) => Err(e),
        },
        other => {
            error!(kind = %other, "Rejected manual send with unknown type");
            return error_response(&Error::InvalidNotificationType);
        }
    };

    match result {
        Ok(notification) => (StatusCode::OK, Json(notification)).into_response(),
        Err(e) => {
            error!(error = %e, "Error sending notification");
            error_response(&e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "type", default = "default_history_type")]
    kind: String,
}

fn default_history_type() -> String {
    "*".to_string()
}

/// GET /api/notifications/history?type=email|sms|push|*
pub async fn notification_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    match fetch_history(&state, &query.kind).await {
        Ok(notifications) => {
            let count = notifications.len();
            (
                StatusCode::OK,
                Json(json!({
                    "notifications": notifications,
                    "count": count,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Error fetching notification history");
            error_response(&e)
        }
    }
}

async fn fetch_history(state: &AppState, kind: &str) -> Result<Vec<Notification>, Error> {
    let prefix = audit_key_prefix(kind);
    let keys = state.store.keys_with_prefix(&prefix).await?;

    let mut notifications = Vec::new();
    for key in keys {
        if let Some(data) = state.store.get(&key).await? {
            match serde_json::from_str::<Notification>(&data) {
                Ok(notification) => notifications.push(notification),
                Err(e) => error!(key, error = %e, "Skipping unreadable audit record"),
            }
        }
    }

    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notifications.truncate(HISTORY_LIMIT);
    Ok(notifications)
}

fn parse<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, Error> {
    serde_json::from_value(body).map_err(|e| Error::InvalidRequest(e.to_string()))
}

fn error_response(err: &Error) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
