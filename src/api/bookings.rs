//! Booking API endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        booking::{AvailabilityQuery, Booking, BookingDraft, CalendarEvent, CreateBooking, SlotAvailability},
        catalog::EquipmentStock,
    },
};

/// List all bookings ordered by date, period and lesson slot
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "Bookings", body = Vec<Booking>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings.list_bookings().await?;
    Ok(Json(bookings))
}

/// Create a booking if the slot has enough equipment left
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse),
        (status = 409, description = "Insufficient equipment for this slot", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown equipment kind", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    payload: Result<Json<CreateBooking>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let Json(data) = payload?;
    let booking = state
        .services
        .bookings
        .create_booking(&BookingDraft::from(data))
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.bookings.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Calendar entries for all bookings
#[utoipa::path(
    get,
    path = "/bookings/events",
    tag = "bookings",
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEvent>)
    )
)]
pub async fn list_events(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.services.bookings.calendar_events().await?;
    Ok(Json(events))
}

/// Equipment left for one date, period and lesson slot
#[utoipa::path(
    get,
    path = "/availability",
    tag = "bookings",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Slot availability", body = SlotAvailability),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> AppResult<Json<SlotAvailability>> {
    let Query(query) = query?;
    let availability = state.services.bookings.availability(&query).await?;
    Ok(Json(availability))
}

/// Equipment catalog
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "bookings",
    responses(
        (status = 200, description = "Equipment owned", body = Vec<EquipmentStock>)
    )
)]
pub async fn get_catalog(
    State(state): State<crate::AppState>,
) -> Json<Vec<EquipmentStock>> {
    Json(state.services.bookings.catalog().entries().to_vec())
}
