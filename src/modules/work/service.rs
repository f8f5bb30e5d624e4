use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::work::model::{CreateWorkRequest, UpdateWorkRequest, WorkRecord};
use crate::utils::errors::AppError;

/// Pay for a session: minutes at a per-60-minute rate.
pub fn total_amount(minutes: f64, rate_per60: f64) -> f64 {
    minutes / 60.0 * rate_per60
}

/// Upper bound on the hour part of a `"H.MM"` string. Anything longer is
/// a client mistake, not a work session.
const MAX_TIME_STR_HOURS: u32 = 100_000;

/// Parse an `"H.MM"` duration string into total minutes.
///
/// The integer part is hours, the fractional digits are minutes. A single
/// fractional digit means tens of minutes: `"1.5"` is 1h50m (110), not
/// 1h05m. Clients were built against that reading, so it is kept as
/// documented behavior. `"2.30"` is 150, `"3"` is 180. Hour parts above
/// [`MAX_TIME_STR_HOURS`] are rejected.
pub fn parse_time_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (hours_part, minutes_part) = match s.split_once('.') {
        Some((h, m)) => (h, m),
        None => (s, ""),
    };

    let hours: u32 = hours_part.parse().ok()?;
    if hours > MAX_TIME_STR_HOURS {
        return None;
    }
    let minutes: u32 = match minutes_part.len() {
        0 => 0,
        1 => minutes_part.parse::<u32>().ok()? * 10,
        _ => {
            if !minutes_part.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            minutes_part[..2].parse().ok()?
        }
    };

    Some(f64::from(hours) * 60.0 + f64::from(minutes))
}

/// Resolve the session duration from either a direct minutes value or the
/// `"H.MM"` alternative. A direct value wins when both are supplied.
pub fn resolve_minutes(minutes: Option<f64>, time_str: Option<&str>) -> Result<f64, AppError> {
    let resolved = match (minutes, time_str) {
        (Some(m), _) => m,
        (None, Some(t)) => parse_time_str(t)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Invalid timeStr")))?,
        (None, None) => {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "minutes or timeStr is required"
            )));
        }
    };

    if resolved <= 0.0 || !resolved.is_finite() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "minutes must be a positive number"
        )));
    }

    Ok(resolved)
}

pub struct WorkService;

impl WorkService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateWorkRequest) -> Result<WorkRecord, AppError> {
        if dto.work_type.trim().is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("workType is required")));
        }
        if dto.rate_per60 <= 0.0 || !dto.rate_per60.is_finite() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "ratePer60 must be a positive number"
            )));
        }

        let minutes = resolve_minutes(dto.minutes, dto.time_str.as_deref())?;
        let total = total_amount(minutes, dto.rate_per60);

        let work = sqlx::query_as::<_, WorkRecord>(
            "INSERT INTO work_records (farmer_id, date, work_type, minutes, rate_per60, total_amount, notes)
             VALUES ($1, COALESCE($2, NOW()), $3, $4, $5, $6, $7)
             RETURNING id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes",
        )
        .bind(dto.farmer_id)
        .bind(dto.date)
        .bind(dto.work_type.trim())
        .bind(minutes)
        .bind(dto.rate_per60)
        .bind(total)
        .bind(&dto.notes)
        .fetch_one(db)
        .await
        .map_err(map_farmer_fk)?;

        Ok(work)
    }

    /// Update a work record. `total_amount` is always recomputed from the
    /// merged minutes/rate so it can never go stale.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateWorkRequest,
    ) -> Result<WorkRecord, AppError> {
        let existing = Self::get(db, id).await?;

        let minutes = match (dto.minutes, dto.time_str.as_deref()) {
            (None, None) => existing.minutes,
            (minutes, time_str) => resolve_minutes(minutes, time_str)?,
        };
        let rate_per60 = dto.rate_per60.unwrap_or(existing.rate_per60);
        if rate_per60 <= 0.0 || !rate_per60.is_finite() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "ratePer60 must be a positive number"
            )));
        }
        let total = total_amount(minutes, rate_per60);

        let farmer_id = dto.farmer_id.unwrap_or(existing.farmer_id);
        let work_type = dto.work_type.unwrap_or(existing.work_type);
        // Outer None means the field was absent; Some(None) clears the note.
        let notes = match dto.notes {
            Some(notes) => notes,
            None => existing.notes,
        };
        let date = dto.date.unwrap_or(existing.date);

        let work = sqlx::query_as::<_, WorkRecord>(
            "UPDATE work_records
             SET farmer_id = $1, date = $2, work_type = $3, minutes = $4,
                 rate_per60 = $5, total_amount = $6, notes = $7
             WHERE id = $8
             RETURNING id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes",
        )
        .bind(farmer_id)
        .bind(date)
        .bind(&work_type)
        .bind(minutes)
        .bind(rate_per60)
        .bind(total)
        .bind(&notes)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(map_farmer_fk)?;

        Ok(work)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM work_records WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Work not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<WorkRecord, AppError> {
        sqlx::query_as::<_, WorkRecord>(
            "SELECT id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes
             FROM work_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Work not found")))
    }

    /// List work records, optionally filtered to one farmer, most recent
    /// first.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, farmer_id: Option<Uuid>) -> Result<Vec<WorkRecord>, AppError> {
        let works = match farmer_id {
            Some(farmer_id) => {
                sqlx::query_as::<_, WorkRecord>(
                    "SELECT id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes
                     FROM work_records WHERE farmer_id = $1 ORDER BY date DESC",
                )
                .bind(farmer_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, WorkRecord>(
                    "SELECT id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes
                     FROM work_records ORDER BY date DESC",
                )
                .fetch_all(db)
                .await?
            }
        };

        Ok(works)
    }

    /// Chronological (oldest first) listing used by the history views.
    #[instrument(skip(db))]
    pub async fn history_for_farmer(
        db: &PgPool,
        farmer_id: Uuid,
    ) -> Result<Vec<WorkRecord>, AppError> {
        let works = sqlx::query_as::<_, WorkRecord>(
            "SELECT id, farmer_id, date, work_type, minutes, rate_per60, total_amount, payment_given, notes
             FROM work_records WHERE farmer_id = $1 ORDER BY date ASC",
        )
        .bind(farmer_id)
        .fetch_all(db)
        .await?;

        Ok(works)
    }
}

fn map_farmer_fk(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!("Farmer not found"));
        }
    }
    AppError::database(anyhow::Error::from(e))
}
