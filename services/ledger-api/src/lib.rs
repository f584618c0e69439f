//! Ledger API
//!
//! HTTP service for client records, subscription plans and billing
//! transactions.
//!
//! ## REST Endpoints
//!
//! - `GET /` - Basic credential challenge
//! - `POST /clients/`, `GET /clients/` - Create / list clients
//! - `GET|PATCH|PUT|DELETE /clients/{id}` - Read, merge-patch, replace, delete
//! - `POST /clients/{id}/subscribe/{subscription_id}?status=` - Enroll a client
//! - `GET /clients/{id}/subscriptions?status=` - List a client's enrollments
//! - `POST /subscriptions/`, `GET /subscriptions/` - Create / list plans
//! - `POST /transactions/`, `GET /transactions/` - Record / list transactions
//! - `POST /transactions/invoice/` - Compute an invoice total
//!
//! Collection routes answer with and without the trailing slash.
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use crate::config::{Config, ConfigError};
pub use crate::state::AppState;

use crate::handlers::shared::not_found;
use crate::handlers::{health, ready};

/// Build the HTTP router with its middleware stack
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    let client_routes = Router::new()
        .route("/clients", get(handlers::list_clients).post(handlers::create_client))
        .route("/clients/", get(handlers::list_clients).post(handlers::create_client))
        .route(
            "/clients/{id}",
            get(handlers::get_client)
                .patch(handlers::patch_client)
                .put(handlers::put_client)
                .delete(handlers::delete_client),
        )
        .route(
            "/clients/{id}/subscribe/{subscription_id}",
            post(handlers::subscribe_client),
        )
        .route(
            "/clients/{id}/subscriptions",
            get(handlers::list_client_subscriptions),
        )
        .route(
            "/clients/{id}/suscriptions",
            get(handlers::list_client_subscriptions),
        );

    let subscription_routes = Router::new()
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        .route(
            "/subscriptions/",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        );

    let transaction_routes = Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/invoice", post(handlers::build_invoice))
        .route("/transactions/invoice/", post(handlers::build_invoice));

    let api = Router::new()
        .route("/", get(handlers::root))
        .merge(client_routes)
        .merge(subscription_routes)
        .merge(transaction_routes);

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .merge(api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .fallback(not_found)
        .with_state(state)
}
