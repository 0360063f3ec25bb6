pub mod auth;
pub mod bookings;
pub mod error;
pub mod middleware;


use axum::{
    Router,
    routing::{get, post, put},
};

use crate::auth::AppState;

/// Assemble the full route table. Outer layers (CORS, tracing) are the
/// binary's concern.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/user/signup", post(auth::signup))
        .route("/user/login", post(auth::login))
        .route("/user/logout", post(auth::logout))
        .with_state(state.clone());

    let protected = Router::new()
        .route(
            "/user/booking",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route("/user/cancelbooking/{id}", put(bookings::cancel_booking))
        .route("/user/completebooking/{id}", put(bookings::complete_booking))
        // Kept as PUT to match the original public surface.
        .route("/user/deletebooking/{id}", put(bookings::delete_booking))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(public)
        .merge(protected)
}

async fn health() -> &'static str {
    "Hello world"
}
