use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::farmers::model::Farmer;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const FARMER_COLUMNS: &str = "id, name, phone, profile_image, created_at";

pub struct FarmerService;

impl FarmerService {
    /// Create a farmer account. A phone number already in use fails with
    /// 409; the check is backed by the unique constraint so a racing
    /// duplicate cannot slip through between check and insert.
    #[instrument(skip(db, password, profile_image))]
    pub async fn create(
        db: &PgPool,
        name: &str,
        phone: &str,
        password: &str,
        profile_image: Option<String>,
    ) -> Result<Farmer, AppError> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE phone = $1")
            .bind(phone)
            .fetch_one(db)
            .await?;
        if exists > 0 {
            return Err(AppError::conflict(anyhow::anyhow!("Farmer already exists")));
        }

        let hashed = hash_password(password)?;

        let farmer = sqlx::query_as::<_, Farmer>(&format!(
            "INSERT INTO farmers (name, phone, password, profile_image)
             VALUES ($1, $2, $3, $4)
             RETURNING {FARMER_COLUMNS}"
        ))
        .bind(name)
        .bind(phone)
        .bind(&hashed)
        .bind(&profile_image)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow::anyhow!("Farmer already exists"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(farmer)
    }

    /// Newest-first listing for the admin dashboard.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Farmer>, AppError> {
        let farmers = sqlx::query_as::<_, Farmer>(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(farmers)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Farmer, AppError> {
        sqlx::query_as::<_, Farmer>(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Farmer not found")))
    }

    /// Delete a farmer and every ledger row referencing it, in one
    /// transaction (post-condition: zero remaining references). Returns
    /// the removed profile image path, if any, so the caller can clean up
    /// the stored file.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<Option<String>, AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM payments WHERE farmer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM work_records WHERE farmer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let profile_image = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM farmers WHERE id = $1 RETURNING profile_image",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Farmer not found")))?;

        tx.commit().await?;

        Ok(profile_image)
    }
}
