use anyhow::anyhow;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use rentora_db::models::BookingRow;
use rentora_types::api::{
    Ack, BookingView, Claims, CreateBookingData, CreateBookingRequest, CreateBookingResponse,
    ListBookingsResponse,
};
use rentora_types::models::BookingStatus;

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.car_name.is_empty() || req.days < 1 || req.days > 365 || req.rent_per_day < 0.0 {
        return Err(ApiError::Validation("Please send all details"));
    }

    let booking_id = state
        .db
        .insert_booking(claims.id, &req.car_name, req.rent_per_day, req.days)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            success: true,
            data: CreateBookingData {
                message: "Successfully created booking",
                booking_id,
                total_cost: req.rent_per_day * req.days as f64,
            },
        }),
    ))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.db.list_bookings(claims.id)?;

    // Empty result is reported as NotFound, matching the service's original
    // contract. Debatable, but clients depend on it.
    if rows.is_empty() {
        return Err(ApiError::NotFound("No Bookings Found"));
    }

    let bookings = rows
        .into_iter()
        .map(to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListBookingsResponse {
        message: "Successfully fetched bookings",
        success: true,
        bookings,
    }))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let changed =
        state
            .db
            .transition_booking(id, claims.id, BookingStatus::Booked, BookingStatus::Cancelled)?;
    if !changed {
        return Err(ApiError::NotFound("Booking not found"));
    }

    Ok(Json(Ack {
        message: "Booking cancelled",
        success: true,
    }))
}

pub async fn complete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let changed =
        state
            .db
            .transition_booking(id, claims.id, BookingStatus::Booked, BookingStatus::Completed)?;
    if !changed {
        return Err(ApiError::NotFound("Booking not found"));
    }

    Ok(Json(Ack {
        message: "Booking completed",
        success: true,
    }))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state.db.delete_booking(id, claims.id)?;
    if !removed {
        return Err(ApiError::NotFound("Booking not found"));
    }

    Ok(Json(Ack {
        message: "Booking deleted",
        success: true,
    }))
}

fn to_view(row: BookingRow) -> Result<BookingView, ApiError> {
    let status = BookingStatus::parse(&row.status)
        .ok_or_else(|| anyhow!("unknown booking status {:?} for booking {}", row.status, row.id))?;

    Ok(BookingView {
        id: row.id,
        user_id: row.user_id,
        car_name: row.car_name,
        rent_per_day: row.rent_per_day,
        days: row.days,
        status,
        total_cost: row.rent_per_day * row.days as f64,
        created_at: row.created_at,
    })
}
