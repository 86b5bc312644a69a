//! Reconciler and fulfillment error types.

use domain::OrderError;
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur while reconciling a webhook event.
///
/// Fulfillment failures are not represented here: they are caught per order
/// and converted into a terminal `failed` status rather than surfaced to the
/// webhook caller.
#[derive(Debug, Error)]
pub enum ReconcilerError {
    /// The webhook token did not match the configured shared secret.
    #[error("Invalid webhook token")]
    InvalidToken,

    /// Order store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Order state machine violation.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Errors that can occur when submitting a line item upstream.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// Network-level failure or timeout reaching the provisioning API.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provisioning API answered with a non-success HTTP status.
    #[error("Unexpected upstream status: {0}")]
    UnexpectedStatus(u16),

    /// The 200 response body did not carry a provider order id.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The submission was rejected by the provider.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}
