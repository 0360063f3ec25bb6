use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{EncodingKey, Header, encode};

use rentora_db::Database;
use rentora_types::api::{Ack, Claims, LoginRequest, PublicUser, SignupRequest, SignupResponse};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub auth: AuthConfig,
}

/// Session settings built once from the environment and injected at startup.
/// Handlers and middleware never read the environment themselves.
pub struct AuthConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    pub secure_cookies: bool,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("Please send all details"));
    }

    // Check-then-act window here is backstopped by the UNIQUE constraint on
    // users.username; a racing insert surfaces as a 500, not a duplicate row.
    if state.db.get_user_by_username(&req.username)?.is_some() {
        return Err(ApiError::Conflict);
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?
        .to_string();

    let user = state.db.create_user(&req.username, &password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User Signedup successfully",
            success: true,
            user: PublicUser {
                id: user.id,
                username: user.username,
                created_at: user.created_at,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("Please enter all fields"));
    }

    // Unknown user and wrong password take the same exit.
    let user = state
        .db
        .get_user_by_username(&req.username)?
        .ok_or(ApiError::InvalidCredentials)?;

    let parsed_hash =
        PasswordHash::new(&user.password).map_err(|e| anyhow!("stored hash unreadable: {e}"))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let token = create_token(&state.auth.jwt_secret, user.id, &user.username)?;
    let jar = jar.add(session_cookie(&state.auth, token));

    Ok((
        jar,
        Json(Ack {
            message: "Successfully logged in",
            success: true,
        }),
    ))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    // Removal cookie must carry the same path as the one set at login.
    let jar = jar.remove(
        Cookie::build((state.auth.cookie_name.clone(), ""))
            .path("/")
            .build(),
    );

    (
        jar,
        Json(Ack {
            message: "Logged out successfully",
            success: true,
        }),
    )
}

fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(auth.secure_cookies)
        .path("/")
        .build()
}

pub(crate) fn create_token(secret: &str, user_id: i64, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
