//! # Field Schedule API
//!
//! HTTP surface of the field scheduling service: field management, time slot
//! catalog management, one-month schedule generation, manual creation, rebinding, status updates,
//! deletion and the listing queries.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into service calls
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration
//!
//! Business rules live in `fieldsched-core`; this crate only wires them to Axum.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use fieldsched_core::{
    repository::Repositories,
    services::{
        field::FieldService,
        field_schedule::{FieldScheduleService, ScheduleSettings},
        time_slot::TimeSlotService,
    },
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(repositories, ScheduleSettings::default()));
/// let app = fieldsched_api::router(state);
/// ```
pub struct ApiState {
    pub fields: FieldService,
    pub field_schedules: FieldScheduleService,
    pub time_slots: TimeSlotService,
}

impl ApiState {
    pub fn new(repositories: Repositories, settings: ScheduleSettings) -> Self {
        Self {
            fields: FieldService::new(repositories.fields.clone()),
            time_slots: TimeSlotService::new(repositories.time_slots.clone()),
            field_schedules: FieldScheduleService::new(repositories, settings),
        }
    }
}

/// Every route of the service with state attached, without transport layers.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Field management endpoints
        .merge(routes::field::routes())
        // Time slot catalog endpoints
        .merge(routes::time_slot::routes())
        // Field schedule endpoints
        .merge(routes::field_schedule::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and repositories
///
/// Installs the global tracing subscriber, builds the router, applies CORS,
/// request tracing and the request deadline, then serves until the process
/// is stopped.
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let pool = fieldsched_db::create_pool(&config.database_url, config.pool_settings()).await?;
/// start_server(config, fieldsched_db::pg_repositories(pool)).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, repositories: Repositories) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = ScheduleSettings {
        timezone: config.schedule_timezone,
        ..ScheduleSettings::default()
    };
    let state = Arc::new(ApiState::new(repositories, settings));

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        timezone = %config.schedule_timezone,
        "Server listening on http://{}", addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
