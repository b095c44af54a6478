//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use market_opinion::{phrases, OpinionError};
use opinion_core::{OpinionRequest, ANONYMOUS_SESSION};

use crate::state::AppState;
use crate::usage::{Admission, UsageSnapshot};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: u64,
}

#[derive(Debug, Serialize)]
pub struct OpinionResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            reply: Some(reply.into()),
        }
    }

    fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            reply: None,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn empty_message() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Mesaj boş", phrases::EMPTY_MESSAGE_REPLY)),
    )
}

fn quota_exceeded() -> ApiError {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::new("Günlük limit aşıldı", phrases::QUOTA_REPLY)),
    )
}

pub fn server_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Sunucu hatası", phrases::BUSY_REPLY)),
    )
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub usage: UsageSnapshot,
    pub sessions: u64,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn root() -> &'static str {
    "Finans Uzmanı Chat API çalışıyor. POST /finans-uzmani kullan."
}

/// Browsers hitting the chat endpoint get a hint instead of 405
pub async fn usage_hint() -> &'static str {
    "Bu endpoint POST ister. JSON body: {\"message\":\"...\"}"
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.session_count(),
    })
}

/// Main opinion endpoint
pub async fn opinion_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<OpinionRequest>, JsonRejection>,
) -> Result<Json<OpinionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        empty_message()
    })?;

    if request.is_blank() {
        return Err(empty_message());
    }

    let client = client_key(&headers, &request);
    match state.admit(&client, Utc::now().date_naive()) {
        Admission::Blocked => return Err(quota_exceeded()),
        Admission::Allowed {
            remaining: Some(remaining),
        } => tracing::debug!(client = %client, remaining, "Request admitted"),
        Admission::Allowed { remaining: None } => {}
    }

    match state.advisor.respond(&request) {
        Ok(reply) => Ok(Json(OpinionResponse { reply: reply.text })),
        Err(OpinionError::EmptyMessage) => Err(empty_message()),
        Err(e) => {
            tracing::error!(error = %e, client = %client, "Opinion request failed");
            Err(server_error())
        }
    }
}

/// Idempotent daily refresh, also run hourly in the background
pub async fn check_update(State(state): State<AppState>) -> Json<RefreshResponse> {
    let today = Utc::now().date_naive();
    let refreshed = state.refresh(today);

    Json(RefreshResponse {
        refreshed,
        date: today,
    })
}

pub async fn admin_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, ApiError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::bare("Admin endpoint disabled")),
        ));
    };

    if bearer_token(&headers) != Some(expected) {
        tracing::warn!("Rejected admin request with bad token");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::bare("Unauthorized")),
        ));
    }

    Ok(Json(StatsResponse {
        usage: state.usage.snapshot(),
        sessions: state.session_count(),
    }))
}

/// Converts a caught panic into the generic 500 reply
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    server_error().into_response()
}

// ============================================================================
// Helpers
// ============================================================================

/// Quota key: first `x-forwarded-for` hop, else session id, else anonymous
fn client_key(headers: &HeaderMap, request: &OpinionRequest) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(ANONYMOUS_SESSION)
        .to_string()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let request = OpinionRequest::new("x").with_session("s1");

        assert_eq!(client_key(&headers, &request), "203.0.113.7");
        assert_eq!(client_key(&HeaderMap::new(), &request), "s1");
        assert_eq!(
            client_key(&HeaderMap::new(), &OpinionRequest::new("x")),
            ANONYMOUS_SESSION
        );
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
