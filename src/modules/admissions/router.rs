use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{
    admission_summary, delete_admission, get_admission, list_admissions, print_admission,
    update_admission_status,
};

pub fn init_admissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_admissions))
        .route("/summary", get(admission_summary))
        .route("/{id}", get(get_admission).delete(delete_admission))
        .route("/{id}/status", patch(update_admission_status))
        .route("/{id}/print", get(print_admission))
}
