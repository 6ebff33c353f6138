//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use attendance::{AttendanceConfig, attendance_router, store::AttendanceStore};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,attendance=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let attendance_config = load_attendance_config()?;
    let attendance_store = AttendanceStore::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            http::HeaderName::from_static("x-device-info"),
        ]))
        .allow_credentials(true);

    let app = Router::new()
        .nest(
            "/api/attendance",
            attendance_router(attendance_store, attendance_config),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn not_found() -> AppError {
    AppError::not_found("No such endpoint")
}

/// Debug builds fall back to a random identity secret; release builds
/// must share `IDENTITY_SECRET` with the authentication service.
fn load_attendance_config() -> anyhow::Result<AttendanceConfig> {
    let secret_b64 = match env::var("IDENTITY_SECRET") {
        Ok(value) => value,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("IDENTITY_SECRET not set, using a random development secret");
            return Ok(AttendanceConfig::development());
        }
        Err(_) => anyhow::bail!("IDENTITY_SECRET must be set in production"),
    };

    let secret_bytes = Engine::decode(&general_purpose::STANDARD, secret_b64.trim())?;
    let secret: [u8; 32] = secret_bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("IDENTITY_SECRET must decode to 32 bytes, got {}", b.len()))?;

    Ok(AttendanceConfig::with_secret(secret))
}
