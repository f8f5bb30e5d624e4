use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A farmer as exposed over the wire. The password hash never leaves the
/// service layer; this type simply has no field for it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterFarmerRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFarmerResponse {
    pub success: bool,
    pub message: String,
    pub farmer_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateFarmerResponse {
    pub success: bool,
    pub farmer: Farmer,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerListResponse {
    pub success: bool,
    pub farmers: Vec<Farmer>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFarmerRequest {
    pub admin_password: String,
}
