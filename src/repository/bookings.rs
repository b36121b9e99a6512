//! Bookings repository (PostgreSQL)

use async_trait::async_trait;
use sqlx::{Executor, Pool, Postgres};

use super::BookingStore;
use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, Bucket, NewBooking},
    services::availability::AvailabilityChecker,
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

async fn sum_bucket<'e, E>(executor: E, bucket: &Bucket) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(quantity), 0)::bigint FROM bookings
        WHERE equipment_kind = $1 AND period = $2 AND lesson_slot = $3 AND booking_date = $4
        "#,
    )
    .bind(&bucket.equipment_kind)
    .bind(bucket.period)
    .bind(bucket.lesson_slot)
    .bind(bucket.date)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn list(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings ORDER BY booking_date, period, lesson_slot, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn committed_quantity(&self, bucket: &Bucket) -> AppResult<i64> {
        Ok(sum_bucket(&self.pool, bucket).await?)
    }

    async fn insert_if_available(
        &self,
        booking: &NewBooking,
        checker: &AvailabilityChecker,
    ) -> AppResult<Booking> {
        let bucket = booking.bucket();
        let mut tx = self.pool.begin().await?;

        // Held until commit/rollback; other writers on this bucket wait here
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(bucket.lock_key())
            .execute(&mut *tx)
            .await?;

        let committed = sum_bucket(&mut *tx, &bucket).await?;
        checker
            .check(&booking.equipment_kind, booking.quantity, committed)
            .into_result()?;

        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (requester, subject, equipment_kind, quantity, period, lesson_slot, activity, booking_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&booking.requester)
        .bind(&booking.subject)
        .bind(&booking.equipment_kind)
        .bind(booking.quantity)
        .bind(booking.period)
        .bind(booking.lesson_slot)
        .bind(&booking.activity)
        .bind(booking.date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
