//! HTTP surface for the payment-confirmation-to-fulfillment pipeline.
//!
//! Provides the webhook endpoint, the administrative order upsert, and an
//! order status query, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use reconciler::{FulfillmentClient, Reconciler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, F>(state: Arc<AppState<S, F>>, metrics_handle: PrometheusHandle) -> Router
where
    S: OrderStore + Clone + 'static,
    F: FulfillmentClient + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/webhook", post(routes::webhook::receive::<S, F>))
        .route("/update-order", post(routes::orders::upsert::<S, F>))
        .route("/orders/{transaction_id}", get(routes::orders::get::<S, F>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state from a store, a fulfillment client, and the
/// shared webhook secret.
pub fn create_state<S, F>(store: S, client: F, webhook_token: &str) -> Arc<AppState<S, F>>
where
    S: OrderStore + Clone + 'static,
    F: FulfillmentClient + 'static,
{
    let reconciler = Reconciler::new(store.clone(), client, webhook_token);
    Arc::new(AppState { reconciler, store })
}
