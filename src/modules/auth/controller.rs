use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::role::AdminUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AdminLoginRequest, AdminLoginResponse, ChangePasswordRequest, FarmerLoginRequest,
    FarmerLoginResponse, SuccessResponse,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Admin login
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let response = AuthService::admin_login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Farmer login (phone number + password)
#[utoipa::path(
    post,
    path = "/api/auth/farmer/login",
    request_body = FarmerLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = FarmerLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn farmer_login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<FarmerLoginRequest>,
) -> Result<Json<FarmerLoginResponse>, AppError> {
    let response = AuthService::farmer_login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Change the calling administrator's password
#[utoipa::path(
    post,
    path = "/api/admin/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = SuccessResponse),
        (status = 401, description = "Old password incorrect", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, admin, dto))]
pub async fn change_admin_password(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    AuthService::change_admin_password(&state.db, admin.0.id, dto).await?;
    Ok(Json(SuccessResponse::ok()))
}
