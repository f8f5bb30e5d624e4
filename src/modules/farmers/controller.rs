use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::AdminUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::SuccessResponse;
use crate::modules::auth::service::AuthService;
use crate::modules::work::model::WorkRecord;
use crate::modules::work::service::WorkService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pdf::render_work_history;
use crate::utils::storage::ImageStore;

use super::model::{
    CreateFarmerResponse, DeleteFarmerRequest, Farmer, FarmerListResponse, RegisterFarmerRequest,
    RegisterFarmerResponse,
};
use super::service::FarmerService;

/// Public farmer self-registration
#[utoipa::path(
    post,
    path = "/api/farmer",
    request_body = RegisterFarmerRequest,
    responses(
        (status = 201, description = "Farmer registered", body = RegisterFarmerResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 409, description = "Phone number already registered", body = ErrorResponse)
    ),
    tag = "Farmers"
)]
#[instrument(skip(state, dto))]
pub async fn register_farmer(
    State(state): State<AppState>,
    Json(dto): Json<RegisterFarmerRequest>,
) -> Result<(axum::http::StatusCode, Json<RegisterFarmerResponse>), AppError> {
    if dto.name.trim().is_empty() || dto.phone.trim().is_empty() || dto.password.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "All fields are required"
        )));
    }

    let farmer =
        FarmerService::create(&state.db, dto.name.trim(), dto.phone.trim(), &dto.password, None)
            .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(RegisterFarmerResponse {
            success: true,
            message: "Farmer registered successfully".to_string(),
            farmer_id: farmer.id,
        }),
    ))
}

/// Create a farmer with an optional profile image (admin, multipart)
#[utoipa::path(
    post,
    path = "/api/admin/farmers",
    responses(
        (status = 200, description = "Farmer created", body = CreateFarmerResponse),
        (status = 400, description = "Missing fields or bad image", body = ErrorResponse),
        (status = 409, description = "Phone number already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Farmers"
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_farmer(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<Json<CreateFarmerResponse>, AppError> {
    let mut name: Option<String> = None;
    let mut phone: Option<String> = None;
    let mut password: Option<String> = None;
    let mut profile: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request(anyhow::anyhow!("Invalid multipart request: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "name" => name = Some(read_text(field).await?),
            "phone" => phone = Some(read_text(field).await?),
            "password" => password = Some(read_text(field).await?),
            "profile" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Failed to read image: {}", e))
                })?;
                if !bytes.is_empty() {
                    profile = Some((content_type, bytes));
                }
            }
            _ => {}
        }
    }

    let (name, phone, password) = match (name, phone, password) {
        (Some(n), Some(p), Some(pw)) if !n.is_empty() && !p.is_empty() && !pw.is_empty() => {
            (n, p, pw)
        }
        _ => return Err(AppError::bad_request(anyhow::anyhow!("Missing fields"))),
    };

    let profile_image = match profile {
        Some((content_type, bytes)) => {
            let store = ImageStore::new(&state.upload_config);
            Some(store.save(&content_type, &bytes).await?)
        }
        None => None,
    };

    let farmer =
        FarmerService::create(&state.db, &name, &phone, &password, profile_image).await?;

    Ok(Json(CreateFarmerResponse {
        success: true,
        farmer,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map(|s| s.trim().to_string())
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart field: {}", e)))
}

/// List farmers, newest first (admin; passwords never serialized)
#[utoipa::path(
    get,
    path = "/api/admin/farmers",
    responses(
        (status = 200, description = "Farmer list", body = FarmerListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Farmers"
)]
#[instrument(skip(state, _admin))]
pub async fn list_farmers(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<FarmerListResponse>, AppError> {
    let farmers = FarmerService::list(&state.db).await?;
    Ok(Json(FarmerListResponse {
        success: true,
        farmers,
    }))
}

/// Delete a farmer and all associated ledger entries (admin)
///
/// Destructive, so the admin must re-present their password in the body.
#[utoipa::path(
    delete,
    path = "/api/admin/farmer/{id}",
    request_body = DeleteFarmerRequest,
    params(("id" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Farmer and ledgers deleted", body = SuccessResponse),
        (status = 401, description = "Admin password incorrect", body = ErrorResponse),
        (status = 404, description = "Farmer not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Farmers"
)]
#[instrument(skip(state, admin, dto))]
pub async fn delete_farmer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<DeleteFarmerRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if dto.admin_password.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Admin password required"
        )));
    }

    AuthService::verify_admin_password(&state.db, admin.0.id, &dto.admin_password).await?;

    let profile_image = FarmerService::delete(&state.db, id).await?;
    if let Some(path) = profile_image {
        ImageStore::new(&state.upload_config).remove(&path).await;
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Public farmer profile
#[utoipa::path(
    get,
    path = "/api/farmer/{id}",
    params(("id" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Farmer profile", body = Farmer),
        (status = 404, description = "Farmer not found", body = ErrorResponse)
    ),
    tag = "Farmers"
)]
#[instrument(skip(state))]
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Farmer>, AppError> {
    let farmer = FarmerService::get(&state.db, id).await?;
    Ok(Json(farmer))
}

/// Public work history for a farmer, most recent first
#[utoipa::path(
    get,
    path = "/api/farmer/{id}/history",
    params(("id" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Work records", body = Vec<WorkRecord>)
    ),
    tag = "Farmers"
)]
#[instrument(skip(state))]
pub async fn farmer_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<WorkRecord>>, AppError> {
    let works = WorkService::list(&state.db, Some(id)).await?;
    Ok(Json(works))
}

/// Work history rendered as a PDF document
#[utoipa::path(
    get,
    path = "/api/farmer/{id}/history/pdf",
    params(("id" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 404, description = "Farmer not found", body = ErrorResponse)
    ),
    tag = "Farmers"
)]
#[instrument(skip(state))]
pub async fn farmer_history_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let farmer = FarmerService::get(&state.db, id).await?;
    let works = WorkService::history_for_farmer(&state.db, id).await?;

    let bytes = render_work_history(&farmer.name, &farmer.phone, &works)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"work-history-{}.pdf\"", farmer.phone),
            ),
        ],
        bytes,
    ))
}
