//! Payment gateway webhook endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use order_store::OrderStore;
use reconciler::{FulfillmentClient, WebhookEvent};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

/// POST /webhook — receives a payment-event notification.
///
/// Once the token verifies and the payload parses, the gateway always gets a
/// 200 acknowledgment regardless of fulfillment outcome; an error status
/// would trigger redelivery. The body is parsed by hand so malformed
/// payloads map to 400.
#[tracing::instrument(skip(state, body))]
pub async fn receive<S, F>(
    State(state): State<Arc<AppState<S, F>>>,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError>
where
    S: OrderStore + Clone + 'static,
    F: FulfillmentClient + 'static,
{
    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook payload: {e}")))?;

    let outcome = state.reconciler.reconcile(event).await?;
    tracing::debug!(?outcome, "webhook reconciled");

    Ok(Json(WebhookAck { status: "received" }))
}
