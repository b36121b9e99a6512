//! In-memory booking store, used for tests and local demos

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::BookingStore;
use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, Bucket, NewBooking},
    services::availability::AvailabilityChecker,
};

#[derive(Default)]
struct State {
    last_id: i32,
    rows: Vec<Booking>,
}

impl State {
    fn committed(&self, bucket: &Bucket) -> i64 {
        self.rows
            .iter()
            .filter(|b| b.bucket() == *bucket)
            .map(|b| i64::from(b.quantity))
            .sum()
    }
}

/// Booking store kept in process memory. One mutex serializes every writer,
/// so check-and-insert is atomic across all buckets.
#[derive(Default)]
pub struct InMemoryBookingStore {
    state: Mutex<State>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn list(&self) -> AppResult<Vec<Booking>> {
        let mut rows = self.state.lock().await.rows.clone();
        rows.sort_by_key(|b| (b.date, b.period, b.lesson_slot, b.id));
        Ok(rows)
    }

    async fn committed_quantity(&self, bucket: &Bucket) -> AppResult<i64> {
        Ok(self.state.lock().await.committed(bucket))
    }

    async fn insert_if_available(
        &self,
        booking: &NewBooking,
        checker: &AvailabilityChecker,
    ) -> AppResult<Booking> {
        let mut state = self.state.lock().await;
        let committed = state.committed(&booking.bucket());
        checker
            .check(&booking.equipment_kind, booking.quantity, committed)
            .into_result()?;

        // Ids are never reused, even after deletes
        state.last_id += 1;
        let row = Booking {
            id: state.last_id,
            requester: booking.requester.clone(),
            subject: booking.subject.clone(),
            equipment_kind: booking.equipment_kind.clone(),
            quantity: booking.quantity,
            period: booking.period,
            lesson_slot: booking.lesson_slot,
            activity: booking.activity.clone(),
            date: booking.date,
            created_at: Utc::now(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let position = state
            .rows
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;
        state.rows.remove(position);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
