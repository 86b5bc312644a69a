use thiserror::Error;

use crate::status::OrderStatus;
use crate::value_objects::Money;

/// Errors raised by order validation and state transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The requested status transition is not allowed by the state machine.
    #[error("Invalid order status transition: {from} -> {to}")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },

    /// The order has no line items.
    #[error("Order must contain at least one line item")]
    NoItems,

    /// A line item has a zero quantity.
    #[error("Line item {index} has an invalid quantity")]
    InvalidQuantity { index: usize },

    /// A line item has a non-positive unit price.
    #[error("Line item {index} has an invalid unit price")]
    InvalidPrice { index: usize },

    /// The order total does not match the sum of its line items.
    #[error("Order total {actual} does not match line item sum {expected}")]
    TotalMismatch { expected: Money, actual: Money },
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, OrderError>;
