use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{create_work, delete_work, list_work, my_work};

/// Routes under `/api/work`. Role checks happen per handler here because
/// the nest mixes admin and farmer endpoints.
pub fn init_work_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_work))
        .route("/add", post(create_work))
        .route("/my", get(my_work))
        .route("/{id}", delete(delete_work))
}
