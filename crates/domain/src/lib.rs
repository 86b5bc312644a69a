//! Domain layer for the fulfillment pipeline.
//!
//! This crate provides the core order model:
//! - Value objects (transaction and provider order identifiers, money, line items)
//! - The Order record linking a payment transaction to its line items
//! - The order status state machine with enforced forward-only transitions

pub mod error;
pub mod order;
pub mod status;
pub mod value_objects;

pub use error::OrderError;
pub use order::{Customer, Order};
pub use status::OrderStatus;
pub use value_objects::{LineItem, Money, ProviderOrderId, QUANTITY_SCALE, TransactionId};
