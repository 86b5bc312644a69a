//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status transitions are monotonic and forward-only:
/// ```text
/// Pending ──► Processing ──┬──► Completed
///                          └──► Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is registered and awaiting payment confirmation.
    #[default]
    Pending,

    /// Payment confirmed, line items are being submitted upstream.
    Processing,

    /// Every line item was fulfilled (terminal state).
    Completed,

    /// At least one line item failed to fulfill (terminal state).
    Failed,
}

impl OrderStatus {
    /// Returns true if fulfillment may be admitted from this status.
    pub fn can_start_processing(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can settle as completed from this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    /// Returns true if the order can settle as failed from this status.
    pub fn can_fail(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// Returns the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
