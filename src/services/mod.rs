//! Business logic services

pub mod availability;
pub mod bookings;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::catalog::Catalog,
    repository::BookingStore,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
}

impl Services {
    /// Create all services on top of the given booking store
    pub fn new(store: Arc<dyn BookingStore>, config: &AppConfig) -> AppResult<Self> {
        let catalog = Catalog::from_config(&config.catalog)?;
        if config.booking.min_lesson_slot > config.booking.max_lesson_slot {
            return Err(AppError::Config(format!(
                "booking.min_lesson_slot ({}) is greater than booking.max_lesson_slot ({})",
                config.booking.min_lesson_slot, config.booking.max_lesson_slot
            )));
        }
        Ok(Self {
            bookings: bookings::BookingsService::new(store, catalog, config.booking.clone()),
        })
    }
}
