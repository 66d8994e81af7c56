use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login, me};

/// Public: mounted outside the admin guard and behind the login limiter.
pub fn init_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
