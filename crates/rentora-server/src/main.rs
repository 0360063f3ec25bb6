use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use rentora_api::auth::{AppState, AppStateInner, AuthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentora=debug,tower_http=debug".into()),
        )
        .init();

    // Config — read once here, injected everywhere else
    let jwt_secret =
        std::env::var("RENTORA_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let cookie_name =
        std::env::var("RENTORA_COOKIE_NAME").unwrap_or_else(|_| "rentora_session".into());
    let secure_cookies = std::env::var("RENTORA_SECURE_COOKIES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let db_path = std::env::var("RENTORA_DB_PATH").unwrap_or_else(|_| "rentora.db".into());
    let host = std::env::var("RENTORA_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("RENTORA_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = rentora_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        auth: AuthConfig {
            jwt_secret,
            cookie_name,
            secure_cookies,
        },
    });

    let app = rentora_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Rentora server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
