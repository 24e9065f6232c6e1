//! Subtitle extraction handlers
//!
//! Handles the single-video and batch extraction endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::handlers::ApiError;
use crate::error::CaptionsError;
use crate::extractor::{extract_captions, Extraction};
use crate::state::AppState;
use crate::youtube;

/// Request body for POST /extract-subtitles
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Video id or full YouTube URL
    pub video_id: Option<String>,
    /// Subtitle language (configured default when absent)
    pub language: Option<String>,
}

/// Request body for POST /extract-multiple
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMultipleRequest {
    /// Kept as raw JSON so a wrong type gets its own error message
    #[serde(default, deserialize_with = "present_value")]
    pub video_ids: Option<serde_json::Value>,
    pub language: Option<String>,
}

/// An explicit JSON null counts as present, not missing.
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Successful extraction payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSuccess {
    pub success: bool,
    pub video_id: String,
    pub video_title: String,
    pub language: String,
    pub srt_content: String,
    pub size: usize,
    pub method: &'static str,
}

impl From<Extraction> for ExtractSuccess {
    fn from(extraction: Extraction) -> Self {
        Self {
            success: true,
            video_id: extraction.video_id,
            video_title: extraction.video_title,
            language: extraction.language,
            srt_content: extraction.srt_content,
            size: extraction.size,
            method: extraction.method,
        }
    }
}

/// Per-item failure inside a batch response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub success: bool,
    pub video_id: String,
    pub error: String,
    pub fallback_recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,
}

/// One element of the batch `results` array
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ItemOutcome {
    Ok(ExtractSuccess),
    Err(ItemFailure),
}

/// Response body for POST /extract-multiple
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMultipleResponse {
    pub success: bool,
    pub total_videos: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<ItemOutcome>,
}

/// Extract subtitles for a single video
/// POST /extract-subtitles
pub async fn extract_subtitles(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractSuccess>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let video_id = request
        .video_id
        .filter(|id| !id.is_empty())
        .ok_or(CaptionsError::MissingField("videoId"))?;
    let video_id = youtube::normalize_video_id(&video_id);
    let language = request
        .language
        .unwrap_or_else(|| state.config.extractor.default_language.clone());

    let extraction = extract_one(&state, &video_id, &language).await?;
    Ok(Json(extraction.into()))
}

/// Extract subtitles for several videos sequentially
/// POST /extract-multiple
pub async fn extract_multiple(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractMultipleRequest>, JsonRejection>,
) -> Result<Json<ExtractMultipleResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let ids: Vec<String> = match request.video_ids {
        None => return Err(CaptionsError::MissingField("videoIds array").into()),
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                // Non-string entries are passed through; the tool rejects them.
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(_) => {
            return Err(
                CaptionsError::InvalidRequest("videoIds must be an array".to_string()).into(),
            )
        }
    };
    let language = request
        .language
        .unwrap_or_else(|| state.config.extractor.default_language.clone());

    let mut results = Vec::with_capacity(ids.len());
    let mut successful = 0usize;

    for raw_id in &ids {
        let video_id = youtube::normalize_video_id(raw_id);
        match extract_one(&state, &video_id, &language).await {
            Ok(extraction) => {
                successful += 1;
                results.push(ItemOutcome::Ok(extraction.into()));
            }
            Err(err) => {
                warn!("Batch item {} failed: {}", video_id, err);
                let available_languages = match &err {
                    CaptionsError::LanguageUnavailable { available, .. } => {
                        Some(available.clone())
                    }
                    _ => None,
                };
                results.push(ItemOutcome::Err(ItemFailure {
                    success: false,
                    video_id,
                    error: err.to_string(),
                    fallback_recommended: true,
                    available_languages,
                }));
            }
        }
    }

    Ok(Json(ExtractMultipleResponse {
        success: true,
        total_videos: ids.len(),
        successful,
        failed: ids.len() - successful,
        results,
    }))
}

/// Run one extraction, consulting the result cache first
async fn extract_one(
    state: &AppState,
    video_id: &str,
    language: &str,
) -> Result<Extraction, CaptionsError> {
    if let Some(hit) = state.caption_cache.get(video_id, language) {
        state.stats.record_cache_hit();
        debug!("Cache hit for {}:{}", video_id, language);
        return Ok(hit);
    }

    match extract_captions(&state.config.extractor, video_id, language).await {
        Ok(extraction) => {
            state.stats.record_success();
            state.caption_cache.insert(extraction.clone());
            Ok(extraction)
        }
        Err(err) => {
            state.stats.record_failure();
            Err(err)
        }
    }
}
