use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::{AdminUser, FarmerUser};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::SuccessResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{
    CreateWorkRequest, UpdateWorkRequest, WorkFilterParams, WorkListResponse, WorkResponse,
};
use super::service::WorkService;

/// Log a work session (admin)
#[utoipa::path(
    post,
    path = "/api/admin/work",
    request_body = CreateWorkRequest,
    responses(
        (status = 200, description = "Work record created", body = WorkResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Farmer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_work(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(dto): Json<CreateWorkRequest>,
) -> Result<Json<WorkResponse>, AppError> {
    let work = WorkService::create(&state.db, dto).await?;
    Ok(Json(WorkResponse {
        success: true,
        work,
    }))
}

/// Update a work session (admin); pay total is recomputed
#[utoipa::path(
    put,
    path = "/api/admin/work/{id}",
    request_body = UpdateWorkRequest,
    params(("id" = Uuid, Path, description = "Work record id")),
    responses(
        (status = 200, description = "Work record updated", body = WorkResponse),
        (status = 404, description = "Work not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_work(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateWorkRequest>,
) -> Result<Json<WorkResponse>, AppError> {
    let work = WorkService::update(&state.db, id, dto).await?;
    Ok(Json(WorkResponse {
        success: true,
        work,
    }))
}

/// Delete a work session (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/work/{id}",
    params(("id" = Uuid, Path, description = "Work record id")),
    responses(
        (status = 200, description = "Work record deleted", body = SuccessResponse),
        (status = 404, description = "Work not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_work(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    WorkService::delete(&state.db, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// List work sessions, optionally for one farmer (admin)
#[utoipa::path(
    get,
    path = "/api/admin/work",
    params(("farmerId" = Option<Uuid>, Query, description = "Filter to one farmer")),
    responses(
        (status = 200, description = "Work records, most recent first", body = WorkListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
#[instrument(skip(state, _admin))]
pub async fn list_work(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<WorkFilterParams>,
) -> Result<Json<WorkListResponse>, AppError> {
    let works = WorkService::list(&state.db, params.farmer_id).await?;
    Ok(Json(WorkListResponse {
        success: true,
        works,
    }))
}

/// List the calling farmer's own work sessions
///
/// The farmer is identified by the token, never by a client-supplied id.
#[utoipa::path(
    get,
    path = "/api/work/my",
    responses(
        (status = 200, description = "Own work records, most recent first", body = WorkListResponse),
        (status = 403, description = "Farmer only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Work"
)]
#[instrument(skip(state, farmer))]
pub async fn my_work(
    State(state): State<AppState>,
    farmer: FarmerUser,
) -> Result<Json<WorkListResponse>, AppError> {
    let works = WorkService::list(&state.db, Some(farmer.0.id)).await?;
    Ok(Json(WorkListResponse {
        success: true,
        works,
    }))
}
