use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::AdminUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::SuccessResponse;
use crate::modules::work::service::WorkService;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{CreatePaymentRequest, HistoryResponse, PaymentResponse, UpdatePaymentRequest};
use super::service::PaymentService;

/// Record a payment to a farmer (admin)
#[utoipa::path(
    post,
    path = "/api/admin/payment/{farmerId}",
    request_body = CreatePaymentRequest,
    params(("farmerId" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Farmer or work not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(farmer_id): Path<Uuid>,
    Json(dto): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment = PaymentService::create(&state.db, farmer_id, dto).await?;
    Ok(Json(PaymentResponse {
        success: true,
        payment,
    }))
}

/// Edit a payment amount (admin)
#[utoipa::path(
    put,
    path = "/api/admin/payment/{id}",
    request_body = UpdatePaymentRequest,
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment updated", body = SuccessResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdatePaymentRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    PaymentService::update(&state.db, id, dto).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Delete a payment (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/payment/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment deleted", body = SuccessResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    PaymentService::delete(&state.db, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Combined work + payment history for one farmer (admin)
#[utoipa::path(
    get,
    path = "/api/admin/history/{farmerId}",
    params(("farmerId" = Uuid, Path, description = "Farmer id")),
    responses(
        (status = 200, description = "Work and payment ledgers, oldest first", body = HistoryResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, _admin))]
pub async fn farmer_ledger_history(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(farmer_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let works = WorkService::history_for_farmer(&state.db, farmer_id).await?;
    let payments = PaymentService::list_by_farmer(&state.db, farmer_id).await?;
    Ok(Json(HistoryResponse {
        success: true,
        works,
        payments,
    }))
}
