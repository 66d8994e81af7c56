use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use schoolhub_core::AppError;

use crate::modules::content::ContentService;
use crate::state::AppState;
use crate::validator::QueryParams;

use super::model::{
    AboutPage, Administrator, CalendarMonth, CalendarQuery, ContactPage, CurriculumPage, Event,
    HomePage, News, NewsQuery, PaginatedNewsResponse, Staff, StudentsPage, UpcomingQuery,
};
use super::service::PublicService;

#[utoipa::path(
    get,
    path = "/api/public/home",
    responses((status = 200, description = "Home page content", body = HomePage)),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomePage>, AppError> {
    Ok(Json(PublicService::home(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/about",
    responses((status = 200, description = "History, facilities and milestones", body = AboutPage)),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Result<Json<AboutPage>, AppError> {
    Ok(Json(PublicService::about(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/administrators",
    responses((status = 200, description = "Active administrators", body = Vec<Administrator>)),
    tag = "Public"
)]
pub async fn administrators(
    State(state): State<AppState>,
) -> Result<Json<Vec<Administrator>>, AppError> {
    Ok(Json(
        ContentService::list_public::<Administrator>(&state.db).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/public/staff",
    responses((status = 200, description = "Active staff members", body = Vec<Staff>)),
    tag = "Public"
)]
pub async fn staff(State(state): State<AppState>) -> Result<Json<Vec<Staff>>, AppError> {
    Ok(Json(ContentService::list_public::<Staff>(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/students",
    responses((status = 200, description = "Achievements and activities", body = StudentsPage)),
    tag = "Public"
)]
pub async fn students(State(state): State<AppState>) -> Result<Json<StudentsPage>, AppError> {
    Ok(Json(PublicService::students(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/curriculum",
    responses((status = 200, description = "Programs and activities", body = CurriculumPage)),
    tag = "Public"
)]
pub async fn curriculum(State(state): State<AppState>) -> Result<Json<CurriculumPage>, AppError> {
    Ok(Json(PublicService::curriculum(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/news",
    params(NewsQuery),
    responses((status = 200, description = "Published news", body = PaginatedNewsResponse)),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn list_news(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NewsQuery>,
) -> Result<Json<PaginatedNewsResponse>, AppError> {
    Ok(Json(PublicService::list_news(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses(
        (status = 200, description = "News item", body = News),
        (status = 404, description = "News item not found or unpublished")
    ),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<News>, AppError> {
    Ok(Json(ContentService::get_public::<News>(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/public/events/upcoming",
    params(UpcomingQuery),
    responses((status = 200, description = "Upcoming events", body = Vec<Event>)),
    tag = "Public"
)]
pub async fn upcoming_events(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UpcomingQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(
        PublicService::upcoming_events(&state.db, query.limit()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/public/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Events touching the month", body = CalendarMonth),
        (status = 422, description = "Year or month out of range")
    ),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn calendar(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    query.validate().map_err(|e| AppError::validation(&e))?;
    let (start, end) = query
        .bounds()
        .ok_or_else(|| AppError::unprocessable(anyhow!("Invalid calendar month")))?;

    Ok(Json(CalendarMonth {
        year: query.year,
        month: query.month,
        events: PublicService::calendar(&state.db, start, end).await?,
    }))
}

#[utoipa::path(
    get,
    path = "/api/public/contact",
    responses((status = 200, description = "Contact details and FAQ", body = ContactPage)),
    tag = "Public"
)]
pub async fn contact_page(State(state): State<AppState>) -> Result<Json<ContactPage>, AppError> {
    Ok(Json(PublicService::contact_page(&state.db).await?))
}
