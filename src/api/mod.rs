//! HTTP handlers: HTML pages and the REST API

pub mod bookings;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Bookings
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/bookings/events", get(bookings::list_events))
        .route("/bookings/:id", delete(bookings::delete_booking))
        .route("/availability", get(bookings::get_availability))
        .route("/catalog", get(bookings::get_catalog))
        .with_state(state.clone());

    // Server-rendered pages
    let pages = Router::new()
        .route("/", get(pages::index).post(pages::submit))
        .route("/delete/:id", get(pages::delete))
        .route("/events", get(pages::events))
        .with_state(state);

    Router::new()
        .merge(pages)
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
