//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod ask;
pub mod health;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{InferenceClient, Relay, RouterClient};
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub relay: Relay,
    pub started_at: Instant,
}

/// Create application router backed by the real inference router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let client = RouterClient::new(&settings.upstream)?;
    create_router_with_client(settings, Arc::new(client))
}

/// Create application router with an explicit upstream client
pub fn create_router_with_client(settings: Settings, client: Arc<dyn InferenceClient>) -> Result<Router> {
    let settings = Arc::new(settings);

    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        relay: Relay::new(settings.clone(), client),
        started_at: Instant::now(),
    });

    // Create middleware stack; the body limit is enforced by the Json
    // extractor so oversized bodies still get a JSON error
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(settings.request.max_request_size));

    let mut router = Router::new()
        .route("/ask", post(ask::handle_ask))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware_stack);

    if settings.security.cors_enabled {
        router = router.layer(cors_layer(&settings.security.allowed_origins)?);
    }

    Ok(router)
}

/// CORS layer for the configured origins; `*` allows any origin
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
