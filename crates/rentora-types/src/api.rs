use serde::{Deserialize, Serialize};

use crate::models::BookingStatus;

// -- JWT Claims --

/// Session token claims carried in the auth cookie. Canonical definition
/// lives here so the REST middleware and the login handler share one
/// identity payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// User fields safe to return to clients. The password hash never leaves
/// the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub success: bool,
    pub user: PublicUser,
}

/// Plain `{message, success}` acknowledgment used by login, logout and the
/// booking transitions.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
    pub success: bool,
}

// -- Bookings --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub car_name: String,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub rent_per_day: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub success: bool,
    pub data: CreateBookingData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingData {
    pub message: &'static str,
    pub booking_id: i64,
    pub total_cost: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: i64,
    pub user_id: i64,
    pub car_name: String,
    pub rent_per_day: f64,
    pub days: i64,
    pub status: BookingStatus,
    /// Derived as `rent_per_day * days`; never stored.
    pub total_cost: f64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ListBookingsResponse {
    pub message: &'static str,
    pub success: bool,
    pub bookings: Vec<BookingView>,
}
