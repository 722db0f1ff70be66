use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use persistence::TodoStore;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::{Config, SecurityConfig};
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{health, todos};

#[derive(Clone)]
pub struct AppState {
    pub store: TodoStore,
}

pub fn create_app(config: &Config, store: TodoStore) -> Router {
    let state = AppState { store };

    let todo_routes = Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/:id",
            patch(todos::update_todo).delete(todos::delete_todo),
        );

    let public_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(todo_routes)
        // Global middleware (bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security))
        .with_state(state)
}

/// Builds the CORS layer.
///
/// With no configured origins every origin, method and header is allowed.
/// Credentials are never allowed, since browsers reject them alongside a
/// wildcard origin.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.cors_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<_> = security
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
