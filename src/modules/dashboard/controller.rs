use axum::{Json, extract::State};
use tracing::instrument;

use schoolhub_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::validator::QueryParams;

use super::model::{DashboardQuery, DashboardResponse, DashboardTab};
use super::service::DashboardService;

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Counters and the selected panel", body = DashboardResponse),
        (status = 400, description = "Unknown tab"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let tab = match query.tab.as_deref().map(str::trim) {
        None | Some("") => DashboardTab::Overview,
        Some(tab) => tab
            .parse::<DashboardTab>()
            .map_err(|e| AppError::bad_request(anyhow::anyhow!(e)))?,
    };

    Ok(Json(DashboardService::load(&state.db, tab).await?))
}
