use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::work::model::WorkRecord;

/// A disbursement to a farmer, optionally offsetting one work record.
/// This table is the single source of truth; per-farmer payment views are
/// derived by query, never stored a second time.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub work_id: Option<Uuid>,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub amount: f64,
    /// When present, the referenced work record's `paymentGiven` is
    /// incremented by `amount` in the same transaction.
    pub work_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub success: bool,
    pub payment: Payment,
}

/// Combined ledger view for one farmer, both lists oldest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub success: bool,
    pub works: Vec<WorkRecord>,
    pub payments: Vec<Payment>,
}
