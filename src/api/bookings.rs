//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, CreateBooking},
};

use super::SharerId;

/// State filter query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct StateQuery {
    /// Lifecycle state filter (ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED)
    pub state: Option<String>,
}

/// Approval decision query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovedQuery {
    /// true to approve, false to reject
    pub approved: bool,
}

/// Create a booking for an item
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Item unavailable, bad time range or self-booking"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let created = state
        .services
        .bookings
        .create_booking(user_id, booking)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID"),
        ApprovedQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 400, description = "Decision already made"),
        (status = 404, description = "Booking not found or caller is not the owner")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Json<BookingDetails>> {
    let updated = state
        .services
        .bookings
        .update_booking(id, user_id, query.approved)
        .await?;
    Ok(Json(updated))
}

/// Get a booking; visible to the booker and the item owner
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found or not visible to caller")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_booking(id, user_id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings, filtered by state
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID"),
        StateQuery
    ),
    responses(
        (status = 200, description = "Caller's bookings", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let state_filter = query.state.as_deref().unwrap_or("ALL");
    let bookings = state
        .services
        .bookings
        .get_bookings_by_state(user_id, state_filter)
        .await?;
    Ok(Json(bookings))
}

/// List bookings on the caller's items, filtered by state
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID"),
        StateQuery
    ),
    responses(
        (status = 200, description = "Bookings on caller's items", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_owner_bookings(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let state_filter = query.state.as_deref().unwrap_or("ALL");
    let bookings = state
        .services
        .bookings
        .get_owner_bookings_by_state(user_id, state_filter)
        .await?;
    Ok(Json(bookings))
}
