//! Operational endpoints.

use axum::extract::State;
use axum::Json;

use clipfetch_dl::ToolInfo;

use crate::context::AppContext;

/// GET /api/tools
///
/// Availability report for the external tools. Useful to debug a
/// deployment that keeps hitting the fallback providers because yt-dlp
/// is missing from PATH.
#[utoipa::path(
    get,
    path = "/api/tools",
    responses(
        (status = 200, description = "External tool availability", body = Vec<ToolInfo>)
    )
)]
pub async fn tools(State(ctx): State<AppContext>) -> Json<Vec<ToolInfo>> {
    Json(ctx.tools.check_all())
}

/// GET /api/config
///
/// The active configuration after defaults, file, and environment
/// overrides were merged.
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Active configuration")
    )
)]
pub async fn config(State(ctx): State<AppContext>) -> Json<clipfetch_core::Config> {
    Json(ctx.config.as_ref().clone())
}
