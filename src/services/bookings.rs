//! Booking service: validation, capacity-checked creation, listing, deletion

use std::sync::Arc;

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{AvailabilityQuery, Booking, BookingDraft, CalendarEvent, SlotAvailability},
        catalog::Catalog,
    },
    repository::BookingStore,
    services::availability::{AvailabilityChecker, Rejection},
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<dyn BookingStore>,
    checker: AvailabilityChecker,
    rules: BookingConfig,
}

impl BookingsService {
    pub fn new(store: Arc<dyn BookingStore>, catalog: Catalog, rules: BookingConfig) -> Self {
        Self {
            store,
            checker: AvailabilityChecker::new(catalog),
            rules,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.checker.catalog()
    }

    pub fn rules(&self) -> &BookingConfig {
        &self.rules
    }

    /// Validate a draft and store it if the slot still has enough equipment
    pub async fn create_booking(&self, draft: &BookingDraft) -> AppResult<Booking> {
        let booking = draft.validate_with(&self.rules)?;
        if !self.catalog().contains(&booking.equipment_kind) {
            tracing::warn!(
                equipment_kind = %booking.equipment_kind,
                "Booking rejected: unknown equipment kind"
            );
            return Err(AppError::Rejected(Rejection::UnknownEquipment));
        }

        match self.store.insert_if_available(&booking, &self.checker).await {
            Ok(created) => {
                tracing::info!(
                    id = created.id,
                    equipment_kind = %created.equipment_kind,
                    quantity = created.quantity,
                    period = %created.period,
                    lesson_slot = created.lesson_slot,
                    date = %created.date,
                    "Booking created"
                );
                Ok(created)
            }
            Err(AppError::Rejected(rejection)) => {
                tracing::warn!(
                    equipment_kind = %booking.equipment_kind,
                    quantity = booking.quantity,
                    period = %booking.period,
                    lesson_slot = booking.lesson_slot,
                    date = %booking.date,
                    "Booking rejected: {}",
                    rejection
                );
                Err(AppError::Rejected(rejection))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete_booking(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "Booking deleted");
        Ok(())
    }

    pub async fn list_bookings(&self) -> AppResult<Vec<Booking>> {
        self.store.list().await
    }

    /// Calendar feed: one single-day entry per booking
    pub async fn calendar_events(&self) -> AppResult<Vec<CalendarEvent>> {
        let bookings = self.store.list().await?;
        Ok(bookings.iter().map(Booking::calendar_event).collect())
    }

    /// Stock left for one bucket
    pub async fn availability(&self, query: &AvailabilityQuery) -> AppResult<SlotAvailability> {
        let bucket = query.bucket(&self.rules)?;
        let total = self
            .catalog()
            .limit(&bucket.equipment_kind)
            .ok_or(AppError::Rejected(Rejection::UnknownEquipment))?;
        let committed = self.store.committed_quantity(&bucket).await?;
        let remaining = self
            .checker
            .remaining(&bucket.equipment_kind, committed)
            .unwrap_or(0);

        Ok(SlotAvailability {
            equipment_kind: bucket.equipment_kind,
            period: bucket.period,
            lesson_slot: bucket.lesson_slot,
            date: bucket.date,
            total,
            committed,
            remaining,
        })
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
