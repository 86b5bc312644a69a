//! Webhook reconciliation for the fulfillment pipeline.
//!
//! This crate interprets inbound payment-event notifications, matches them
//! to a registered order, and drives the order state machine:
//! 1. Verify the shared webhook token
//! 2. Admit the matching pending order (pending -> processing)
//! 3. Fan one fulfillment submission per line item out concurrently
//! 4. Settle the order as completed or failed once every call has settled
//!
//! Fulfillment is submitted through the [`FulfillmentClient`] trait; the
//! HTTP implementation talks to the upstream provisioning API, the
//! in-memory implementation backs the tests.

pub mod error;
pub mod event;
pub mod reconciler;
pub mod services;

pub use error::{FulfillmentError, ReconcilerError};
pub use event::{TRANSACTION_PAID, TRANSACTION_STATUS_COMPLETED, TransactionNotice, WebhookEvent};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use services::{FulfillmentClient, HttpFulfillmentClient, InMemoryFulfillmentClient, Submission};
