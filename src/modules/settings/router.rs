use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_public_settings, get_settings, update_settings};

pub fn init_public_settings_router() -> Router<AppState> {
    Router::new().route("/", get(get_public_settings))
}

pub fn init_settings_router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}
