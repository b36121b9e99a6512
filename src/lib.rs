//! Equipment Booking Server
//!
//! Books a school's shared equipment (notebooks, tablets, speaker sets) per
//! date, period and lesson slot, refusing bookings that would exceed the
//! stock owned. Serves an HTML page with a calendar and a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
