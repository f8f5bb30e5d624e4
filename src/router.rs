use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::require_admin;
use crate::modules::auth::controller::change_admin_password;
use crate::modules::auth::router::init_auth_router;
use crate::modules::farmers::controller::{create_farmer, delete_farmer, list_farmers};
use crate::modules::farmers::router::init_farmers_router;
use crate::modules::payments::controller::{
    create_payment, delete_payment, farmer_ledger_history, update_payment,
};
use crate::modules::work::controller::{create_work, delete_work, list_work, update_work};
use crate::modules::work::router::init_work_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(state.upload_config.dir.clone()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/admin",
                    init_admin_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_admin,
                    )),
                )
                .nest("/work", init_work_router())
                .nest("/farmer", init_farmers_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

/// Everything under `/api/admin`, gated by the admin token layer. The
/// payment routes share one `{id}` segment because axum rejects sibling
/// paths whose parameter names differ; POST reads it as the farmer id.
fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/change-password", post(change_admin_password))
        .route("/farmers", post(create_farmer).get(list_farmers))
        .route("/farmer/{id}", delete(delete_farmer))
        .route("/work", post(create_work).get(list_work))
        .route("/work/{id}", put(update_work).delete(delete_work))
        .route(
            "/payment/{id}",
            post(create_payment).put(update_payment).delete(delete_payment),
        )
        .route("/history/{id}", get(farmer_ledger_history))
}
