//! HTML booking page and calendar feed

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingDraft, CalendarEvent},
    views::IndexPage,
    AppState,
};

async fn render_index(
    state: &AppState,
    status: StatusCode,
    error: Option<&str>,
    draft: &BookingDraft,
) -> AppResult<Response> {
    let bookings = state.services.bookings.list_bookings().await?;
    let page = IndexPage {
        catalog: state.services.bookings.catalog(),
        rules: state.services.bookings.rules(),
        bookings: &bookings,
        error,
        draft,
    };
    Ok((status, Html(page.render())).into_response())
}

/// Booking form, calendar and list of bookings
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    render_index(&state, StatusCode::OK, None, &BookingDraft::default()).await
}

/// Form submission: redirect on success, re-render with the reason otherwise
pub async fn submit(
    State(state): State<AppState>,
    Form(draft): Form<BookingDraft>,
) -> AppResult<Response> {
    match state.services.bookings.create_booking(&draft).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e @ AppError::Validation(_)) => {
            render_index(&state, StatusCode::BAD_REQUEST, Some(&e.user_message()), &draft).await
        }
        Err(e @ AppError::Rejected(_)) => {
            render_index(&state, StatusCode::OK, Some(&e.user_message()), &draft).await
        }
        Err(e) => Err(e),
    }
}

/// Delete a booking; a missing id is treated as already deleted
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    match state.services.bookings.delete_booking(id).await {
        Ok(()) | Err(AppError::NotFound(_)) => Ok(Redirect::to("/")),
        Err(e) => Err(e),
    }
}

/// Calendar feed consumed by the page's calendar widget
pub async fn events(State(state): State<AppState>) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.services.bookings.calendar_events().await?;
    Ok(Json(events))
}
