//! Administrative order upsert and status query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use domain::{Order, TransactionId};
use order_store::OrderStore;
use reconciler::{FulfillmentClient, Reconciler};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, F>
where
    S: OrderStore,
    F: FulfillmentClient,
{
    pub reconciler: Reconciler<S, F>,
    pub store: S,
}

/// Body of the administrative upsert: the external order-creation flow seeds
/// the store through this entry point.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub transaction_id: TransactionId,
    pub order: Order,
}

#[derive(Serialize)]
pub struct UpdateOrderAck {
    pub status: &'static str,
}

/// POST /update-order — overwrites the stored order for a transaction id.
///
/// This is the sole sanctioned bypass of normal order creation. The payload
/// is parsed by hand so malformed bodies map to 400, and domain invariants
/// (non-empty items, positive quantities and prices, consistent total) are
/// enforced before the write.
#[tracing::instrument(skip(state, body))]
pub async fn upsert<S, F>(
    State(state): State<Arc<AppState<S, F>>>,
    body: Bytes,
) -> Result<Json<UpdateOrderAck>, ApiError>
where
    S: OrderStore + Clone + 'static,
    F: FulfillmentClient + 'static,
{
    let req: UpdateOrderRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order payload: {e}")))?;

    req.order
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(transaction_id = %req.transaction_id, "order registered");
    state.store.put(&req.transaction_id, req.order).await?;

    Ok(Json(UpdateOrderAck { status: "updated" }))
}

/// GET /orders/{transactionId} — returns the stored order.
///
/// Lets callers observe the `processing` status while fulfillment is in
/// flight, and the terminal status afterwards.
#[tracing::instrument(skip(state))]
pub async fn get<S, F>(
    State(state): State<Arc<AppState<S, F>>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
    S: OrderStore + Clone + 'static,
    F: FulfillmentClient + 'static,
{
    let transaction_id = TransactionId::new(transaction_id);
    let order = state
        .store
        .get(&transaction_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {transaction_id} not found")))?;

    Ok(Json(order))
}
