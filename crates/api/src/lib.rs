//! # SchoolDay API
//!
//! The API crate provides the web server for the SchoolDay school administration
//! service. It exposes RESTful endpoints for the course catalog, per-section
//! timetable configuration, schedule placement and attendance statistics.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate payloads and call into the repositories or the schedule backend
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Handle environment and application configuration
//!
//! Schedule mutations go through a [`ScheduleBackend`] trait object so the
//! routes can run against a mock in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use schoolday_core::planner::ScheduleBackend;
use schoolday_db::backend::PgScheduleBackend;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(db_pool));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for catalog, config and attendance queries
    pub db_pool: PgPool,

    /// Where schedule placements are persisted
    pub schedules: Arc<dyn ScheduleBackend>,
}

impl ApiState {
    /// State backed by Postgres for everything, schedules included.
    pub fn new(db_pool: PgPool) -> Self {
        let schedules = Arc::new(PgScheduleBackend::new(db_pool.clone()));
        Self { db_pool, schedules }
    }
}

/// Assembles every route group on top of the shared state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Course catalog endpoints
        .merge(routes::course::routes())
        // Sections and teachers
        .merge(routes::catalog::routes())
        // Timetable configuration and schedule placement
        .merge(routes::schedule::routes())
        // Attendance statuses and statistics
        .merge(routes::attendance::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function sets up logging, configures routes and middleware, and
/// serves until the listener fails.
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = schoolday_db::create_pool(&config.database_url, config.db_max_connections).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(allowed)
        .allow_credentials(true)
}
