use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{admin_login, farmer_login};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/farmer/login", post(farmer_login))
}
