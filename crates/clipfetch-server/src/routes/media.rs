//! Validate and download route handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use clipfetch_core::MediaFormat;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Request body for URL validation.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ValidateRequest {
    pub url: Option<String>,
    /// Accepted for compatibility with older clients that multiplexed
    /// actions over one endpoint; only "validate" is meaningful here.
    #[serde(default)]
    pub action: Option<String>,
}

/// Metadata returned for a valid URL.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ValidateResponse {
    pub success: bool,
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub webpage_url: Option<String>,
}

/// Request body for a download.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DownloadRequest {
    pub url: Option<String>,
    /// One of "video", "audio", "no-watermark" (alias "hd").
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "video".to_string()
}

/// POST /api/validate
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "URL is valid", body = ValidateResponse),
        (status = 400, description = "Missing, malformed, or unsupported URL")
    )
)]
pub async fn validate(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let url = require_url(payload.url.as_deref(), request_id.clone())?;

    tracing::info!(url, "Validating URL");

    let info = ctx
        .fetcher
        .validate(url)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id.0.clone()))?;

    Ok(Json(ValidateResponse {
        success: true,
        title: info.title,
        duration: info.duration,
        webpage_url: info.webpage_url,
    }))
}

/// POST /api/download
#[utoipa::path(
    post,
    path = "/api/download",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Binary media payload with attachment headers"),
        (status = 400, description = "Missing URL or unknown format"),
        (status = 500, description = "Downloader and every fallback provider failed")
    )
)]
pub async fn download(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Json(payload): Json<DownloadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let url = require_url(payload.url.as_deref(), request_id.clone())?;

    let format: MediaFormat = payload
        .format
        .parse()
        .map_err(|e: clipfetch_core::Error| {
            AppError::new(e).with_request_id(request_id.0.clone())
        })?;

    tracing::info!(url, %format, "Processing download request");

    let media = ctx
        .fetcher
        .fetch(url, format)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id.0.clone()))?;

    let headers = [
        (header::CONTENT_TYPE, media.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", media.filename),
        ),
    ];

    Ok((headers, media.bytes))
}

/// Reject a missing or empty URL before anything is spawned or fetched.
fn require_url(url: Option<&str>, request_id: RequestId) -> Result<&str, AppError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(
            AppError::new(clipfetch_core::Error::Validation("URL is required".into()))
                .with_request_id(request_id.0),
        ),
    }
}
