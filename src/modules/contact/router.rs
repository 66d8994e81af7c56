use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    delete_message, get_message, list_messages, mark_read, submit_message, unread_count,
};

pub fn init_contact_submit_router() -> Router<AppState> {
    Router::new().route("/", post(submit_message))
}

pub fn init_messages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages))
        .route("/unread-count", get(unread_count))
        .route("/{id}", get(get_message).delete(delete_message))
        .route("/{id}/read", patch(mark_read))
}
