use axum::{Router, routing::get};

use crate::modules::gallery::controller::{get_public_album, list_public_albums};
use crate::state::AppState;

use super::controller::{
    about, administrators, calendar, curriculum, get_news, home, list_news, staff, students,
    upcoming_events,
};

/// Read-only public pages. The contact page and the two submit endpoints are
/// mounted separately so they can carry their own rate limits.
pub fn init_public_router() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/about", get(about))
        .route("/administrators", get(administrators))
        .route("/staff", get(staff))
        .route("/students", get(students))
        .route("/curriculum", get(curriculum))
        .route("/news", get(list_news))
        .route("/news/{id}", get(get_news))
        .route("/events/upcoming", get(upcoming_events))
        .route("/calendar", get(calendar))
        .route("/gallery", get(list_public_albums))
        .route("/gallery/{id}", get(get_public_album))
}

pub fn init_contact_page_router() -> Router<AppState> {
    Router::new().route("/", get(super::controller::contact_page))
}
