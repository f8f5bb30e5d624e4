use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{farmer_history, farmer_history_pdf, get_farmer, register_farmer};

/// Public routes under `/api/farmer`. The admin-side farmer management
/// routes live in the gated `/api/admin` nest.
pub fn init_farmers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_farmer))
        .route("/{id}", get(get_farmer))
        .route("/{id}/history", get(farmer_history))
        .route("/{id}/history/pdf", get(farmer_history_pdf))
}
