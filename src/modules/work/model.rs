use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One logged labor session. `total_amount` is derived from `minutes` and
/// `rate_per60` at write time and recomputed on every update touching
/// either; `payment_given` accumulates payments linked to this record.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub date: DateTime<Utc>,
    pub work_type: String,
    pub minutes: f64,
    pub rate_per60: f64,
    pub total_amount: f64,
    pub payment_given: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkRequest {
    pub farmer_id: Uuid,
    pub work_type: String,
    /// Direct duration in minutes. When absent, `time_str` is used instead.
    pub minutes: Option<f64>,
    /// Alternate `"H.MM"` time-of-day-style duration, e.g. `"2.30"` for
    /// 2h30m. See [`super::service::parse_time_str`] for the exact rules.
    pub time_str: Option<String>,
    pub rate_per60: f64,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkRequest {
    /// Reassigns the owning farmer when present.
    pub farmer_id: Option<Uuid>,
    pub work_type: Option<String>,
    pub minutes: Option<f64>,
    pub time_str: Option<String>,
    pub rate_per60: Option<f64>,
    /// An absent field keeps the existing note; an explicit `null`
    /// clears it.
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
}

/// Distinguishes `"notes": null` (clear) from the field being absent
/// (keep): the outer `Option` is `None` only when serde never saw the key.
fn deserialize_explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkFilterParams {
    pub farmer_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkResponse {
    pub success: bool,
    pub work: WorkRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkListResponse {
    pub success: bool,
    pub works: Vec<WorkRecord>,
}
