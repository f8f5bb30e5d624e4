use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::payments::model::{CreatePaymentRequest, Payment, UpdatePaymentRequest};
use crate::utils::errors::AppError;

pub struct PaymentService;

impl PaymentService {
    /// Record a payment. When it offsets a work record, the payment insert
    /// and the `payment_given` increment commit together, and the
    /// increment is a single atomic `UPDATE` so concurrent payments
    /// against the same record cannot lose updates.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        farmer_id: Uuid,
        dto: CreatePaymentRequest,
    ) -> Result<Payment, AppError> {
        validate_amount(dto.amount)?;

        let mut tx = db.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (farmer_id, work_id, amount)
             VALUES ($1, $2, $3)
             RETURNING id, farmer_id, work_id, amount, date",
        )
        .bind(farmer_id)
        .bind(dto.work_id)
        .bind(dto.amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("Farmer or work not found"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        if let Some(work_id) = dto.work_id {
            let result = sqlx::query(
                "UPDATE work_records SET payment_given = payment_given + $1 WHERE id = $2",
            )
            .bind(dto.amount)
            .bind(work_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::not_found(anyhow::anyhow!("Work not found")));
            }
        }

        tx.commit().await?;

        Ok(payment)
    }

    /// Change a payment's amount. A linked work record's `payment_given`
    /// is adjusted by the delta in the same transaction, so the
    /// accumulator never drifts from the ledger.
    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdatePaymentRequest) -> Result<(), AppError> {
        validate_amount(dto.amount)?;

        let mut tx = db.begin().await?;

        #[derive(sqlx::FromRow)]
        struct PaymentRow {
            work_id: Option<Uuid>,
            amount: f64,
        }

        let existing = sqlx::query_as::<_, PaymentRow>(
            "SELECT work_id, amount FROM payments WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Payment not found")))?;

        sqlx::query("UPDATE payments SET amount = $1 WHERE id = $2")
            .bind(dto.amount)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(work_id) = existing.work_id {
            sqlx::query(
                "UPDATE work_records SET payment_given = payment_given + $1 WHERE id = $2",
            )
            .bind(dto.amount - existing.amount)
            .bind(work_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Remove a payment, subtracting its amount from a linked work
    /// record's `payment_given`.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        #[derive(sqlx::FromRow)]
        struct DeletedRow {
            work_id: Option<Uuid>,
            amount: f64,
        }

        let deleted = sqlx::query_as::<_, DeletedRow>(
            "DELETE FROM payments WHERE id = $1 RETURNING work_id, amount",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Payment not found")))?;

        if let Some(work_id) = deleted.work_id {
            sqlx::query(
                "UPDATE work_records SET payment_given = payment_given - $1 WHERE id = $2",
            )
            .bind(deleted.amount)
            .bind(work_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Chronological payment ledger for one farmer.
    #[instrument(skip(db))]
    pub async fn list_by_farmer(db: &PgPool, farmer_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, farmer_id, work_id, amount, date
             FROM payments WHERE farmer_id = $1 ORDER BY date ASC",
        )
        .bind(farmer_id)
        .fetch_all(db)
        .await?;

        Ok(payments)
    }
}

fn validate_amount(amount: f64) -> Result<(), AppError> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "amount must be a positive number"
        )));
    }
    Ok(())
}
