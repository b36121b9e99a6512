//! Repository layer for booking storage

pub mod bookings;
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::booking::{Booking, Bucket, NewBooking},
    services::availability::AvailabilityChecker,
};

pub use bookings::BookingsRepository;
pub use memory::InMemoryBookingStore;

/// Durable store of booking records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All bookings ordered by date, period, lesson slot (then id)
    async fn list(&self) -> AppResult<Vec<Booking>>;

    /// Sum of quantities already booked in a bucket
    async fn committed_quantity(&self, bucket: &Bucket) -> AppResult<i64>;

    /// Sum the bucket, run the checker and insert on acceptance, as one
    /// atomic step with respect to other writers on the same bucket.
    ///
    /// A rejection is returned as `AppError::Rejected` and leaves the store
    /// unchanged.
    async fn insert_if_available(
        &self,
        booking: &NewBooking,
        checker: &AvailabilityChecker,
    ) -> AppResult<Booking>;

    /// Delete a booking, `AppError::NotFound` if the id does not exist
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}
