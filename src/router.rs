use std::sync::Arc;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::require_admin;
use crate::modules::admissions::init_admissions_router;
use crate::modules::auth::{init_auth_router, init_login_router};
use crate::modules::contact::{init_contact_submit_router, init_messages_router};
use crate::modules::content::init_content_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::enrollment::{init_enrollment_router, init_enrollment_submit_router};
use crate::modules::gallery::{init_gallery_admin_router, init_photos_router};
use crate::modules::public::{init_contact_page_router, init_public_router};
use crate::modules::settings::{init_public_settings_router, init_settings_router};
use crate::modules::uploads::init_uploads_router;
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

fn public_router(state: &AppState) -> Router<AppState> {
    let limits = &state.rate_limit_config;

    let forms = Router::new()
        .nest("/contact", init_contact_submit_router())
        .nest("/enrollment", init_enrollment_submit_router())
        .layer(GovernorLayer::new(Arc::new(limits.forms_governor_config())));

    Router::new()
        .merge(init_public_router())
        .nest("/settings", init_public_settings_router())
        .nest("/contact", init_contact_page_router())
        .nest("/enrollment", init_enrollment_router())
        .merge(forms)
        .layer(GovernorLayer::new(Arc::new(limits.general_governor_config())))
}

fn admin_router(state: &AppState) -> Router<AppState> {
    let max_upload = state.storage_config.max_upload_bytes();

    let protected = Router::new()
        .merge(init_content_router())
        .nest("/gallery-albums", init_gallery_admin_router(max_upload))
        .nest("/gallery-photos", init_photos_router())
        .nest("/admissions", init_admissions_router())
        .nest("/messages", init_messages_router())
        .nest("/settings", init_settings_router())
        .nest("/uploads", init_uploads_router(max_upload))
        .nest("/dashboard", init_dashboard_router())
        .nest("/auth", init_auth_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let login = Router::new().nest(
        "/auth",
        init_login_router().layer(GovernorLayer::new(Arc::new(
            state.rate_limit_config.auth_governor_config(),
        ))),
    );

    protected.merge(login)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest_service("/files", ServeDir::new(&state.storage_config.dir))
        .nest(
            "/api",
            Router::new()
                .nest("/public", public_router(&state))
                .nest("/admin", admin_router(&state)),
        )
        .fallback(not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
