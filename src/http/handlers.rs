//! HTTP request handlers
//!
//! Implements the service endpoints and the JSON error shape shared by
//! all of them.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::CaptionsError;
use crate::state::AppState;

/// HTTP error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

/// JSON body for every failure response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_recommended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
}

impl ApiError {
    /// 400 response for request-shape problems (missing fields, bad JSON)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                success: false,
                error: message.into(),
                fallback_recommended: None,
                available_languages: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<CaptionsError> for ApiError {
    fn from(err: CaptionsError) -> Self {
        let status = match &err {
            CaptionsError::MissingField(_)
            | CaptionsError::InvalidRequest(_)
            | CaptionsError::Config(_) => StatusCode::BAD_REQUEST,
            CaptionsError::LanguageUnavailable { .. } | CaptionsError::NoCaptions(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let available_languages = match &err {
            CaptionsError::LanguageUnavailable { available, .. } => Some(available.clone()),
            _ => None,
        };

        Self {
            status,
            body: ErrorBody {
                success: false,
                error: err.to_string(),
                fallback_recommended: err.fallback_recommended().then_some(true),
                available_languages,
            },
        }
    }
}

/// Health check endpoint
/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "captions-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("captions-server v", env!("CARGO_PKG_VERSION"))
}

/// Debug endpoint - extraction counters and cache statistics
pub async fn server_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let cache = state.cache_stats();

    Json(serde_json::json!({
        "started_at": state.stats.started_at().to_rfc3339(),
        "uptime_secs": state.stats.uptime_secs(),
        "extractions": {
            "succeeded": state.stats.extractions_succeeded(),
            "failed": state.stats.extractions_failed(),
            "cache_hits": state.stats.cache_hits(),
        },
        "cache": {
            "entry_count": cache.entry_count,
            "total_size_bytes": cache.total_size_bytes,
            "memory_limit_bytes": cache.memory_limit_bytes,
            "oldest_entry_age_secs": cache.oldest_entry_age_secs,
            "utilization": format!("{:.1}%",
                (cache.total_size_bytes as f64 / cache.memory_limit_bytes as f64) * 100.0
            )
        }
    }))
}
