//! Inbound payment-event envelope.

use domain::TransactionId;
use serde::{Deserialize, Serialize};

/// Event name the gateway sends when a transaction has been paid.
pub const TRANSACTION_PAID: &str = "TRANSACTION_PAID";

/// Transaction status that confirms the payment settled.
pub const TRANSACTION_STATUS_COMPLETED: &str = "COMPLETED";

/// The payment gateway's webhook envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event name, e.g. `TRANSACTION_PAID`.
    pub event: String,

    /// Shared-secret token authenticating the gateway.
    pub token: String,

    pub transaction: TransactionNotice,
}

/// The transaction the event refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionNotice {
    pub id: TransactionId,
    pub status: String,
}

impl WebhookEvent {
    /// Returns true if this event confirms a settled payment.
    ///
    /// Any other event name or transaction status is acknowledged without
    /// side effects.
    pub fn is_paid(&self) -> bool {
        self.event == TRANSACTION_PAID && self.transaction.status == TRANSACTION_STATUS_COMPLETED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, status: &str) -> WebhookEvent {
        WebhookEvent {
            event: name.to_string(),
            token: "secret".to_string(),
            transaction: TransactionNotice {
                id: TransactionId::new("T1"),
                status: status.to_string(),
            },
        }
    }

    #[test]
    fn test_paid_event_is_recognized() {
        assert!(event("TRANSACTION_PAID", "COMPLETED").is_paid());
    }

    #[test]
    fn test_other_events_are_not_paid() {
        assert!(!event("TRANSACTION_CREATED", "COMPLETED").is_paid());
        assert!(!event("TRANSACTION_PAID", "PENDING").is_paid());
    }

    #[test]
    fn test_envelope_deserializes_from_gateway_payload() {
        let json = serde_json::json!({
            "event": "TRANSACTION_PAID",
            "token": "secret",
            "transaction": { "id": "T1", "status": "COMPLETED" }
        });
        let event: WebhookEvent = serde_json::from_value(json).unwrap();
        assert!(event.is_paid());
        assert_eq!(event.transaction.id.as_str(), "T1");
    }
}
