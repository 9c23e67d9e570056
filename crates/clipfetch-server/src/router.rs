//! Axum router construction.
//!
//! Builds the application router with all route groups, middleware
//! layers, and the OpenAPI document.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::media::validate,
        routes::media::download,
        routes::admin::tools,
        routes::admin::config,
    ),
    components(schemas(
        routes::media::ValidateRequest,
        routes::media::ValidateResponse,
        routes::media::DownloadRequest,
        clipfetch_dl::ToolInfo,
    ))
)]
struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/validate", post(routes::media::validate))
        .route("/download", post(routes::media::download))
        .route("/tools", get(routes::admin::tools))
        .route("/config", get(routes::admin::config));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
