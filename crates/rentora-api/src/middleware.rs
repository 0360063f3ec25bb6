use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};

use rentora_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Extract and validate the session JWT from the configured cookie.
/// On success the decoded `Claims` ride in the request extensions; that is
/// the only identity-propagation mechanism in the service.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(&state.auth.cookie_name)
        .map(|c| c.value().to_owned())
        .ok_or(ApiError::Unauthorized)?;

    // Default validation enforces signature and expiry.
    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(state.auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}
