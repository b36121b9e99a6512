//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Booking API",
        version = "0.1.0",
        description = "Shared school equipment booking REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::list_bookings,
        bookings::create_booking,
        bookings::delete_booking,
        bookings::list_events,
        bookings::get_availability,
        bookings::get_catalog,
    ),
    components(
        schemas(
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::CalendarEvent,
            crate::models::booking::AvailabilityQuery,
            crate::models::booking::SlotAvailability,
            crate::models::catalog::EquipmentStock,
            crate::models::enums::Period,
            crate::services::availability::Rejection,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Equipment bookings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
