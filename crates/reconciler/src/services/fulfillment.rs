//! Fulfillment client trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::ProviderOrderId;

use crate::error::FulfillmentError;

/// A single line-item fulfillment request, ready for the provider.
///
/// The quantity is already scaled to provider units (thousands multiplied
/// out); the idempotency key is stable across webhook redeliveries of the
/// same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub provider_service_id: String,
    pub link: String,
    pub quantity: u64,
    pub idempotency_key: String,
}

/// Trait for submitting line items to the upstream provisioning API.
///
/// Each call is one chargeable provisioning request; callers must not submit
/// the same (order, item) pair more than once per fulfillment attempt.
#[async_trait]
pub trait FulfillmentClient: Send + Sync {
    /// Submits a single line item and returns the provider-assigned order id.
    ///
    /// The call is attempted exactly once; there is no automatic retry.
    async fn submit(&self, submission: &Submission) -> Result<ProviderOrderId, FulfillmentError>;
}

#[derive(Debug, Default)]
struct InMemoryFulfillmentState {
    submissions: Vec<Submission>,
    next_id: u32,
    fail_on_submit: bool,
    fail_on_service: Option<String>,
}

/// In-memory fulfillment client for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFulfillmentClient {
    state: Arc<RwLock<InMemoryFulfillmentState>>,
}

impl InMemoryFulfillmentClient {
    /// Creates a new in-memory fulfillment client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the client to fail every submission.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_submit = fail;
    }

    /// Configures the client to fail submissions for one service id only.
    pub fn set_fail_on_service(&self, provider_service_id: impl Into<String>) {
        self.state.write().unwrap().fail_on_service = Some(provider_service_id.into());
    }

    /// Returns the number of accepted submissions.
    pub fn submission_count(&self) -> usize {
        self.state.read().unwrap().submissions.len()
    }

    /// Returns every accepted submission, in arrival order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.read().unwrap().submissions.clone()
    }
}

#[async_trait]
impl FulfillmentClient for InMemoryFulfillmentClient {
    async fn submit(&self, submission: &Submission) -> Result<ProviderOrderId, FulfillmentError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_submit {
            return Err(FulfillmentError::Rejected(
                "Submission declined".to_string(),
            ));
        }
        if state.fail_on_service.as_deref() == Some(submission.provider_service_id.as_str()) {
            return Err(FulfillmentError::Rejected(format!(
                "Service {} unavailable",
                submission.provider_service_id
            )));
        }

        state.next_id += 1;
        let id = format!("PROV-{:04}", state.next_id);
        state.submissions.push(submission.clone());

        Ok(ProviderOrderId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(service: &str) -> Submission {
        Submission {
            provider_service_id: service.to_string(),
            link: "https://example.com/profile".to_string(),
            quantity: 2000,
            idempotency_key: "order:0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_records_and_assigns_sequential_ids() {
        let client = InMemoryFulfillmentClient::new();

        let first = client.submit(&submission("S1")).await.unwrap();
        let second = client.submit(&submission("S2")).await.unwrap();

        assert_eq!(first.as_str(), "PROV-0001");
        assert_eq!(second.as_str(), "PROV-0002");
        assert_eq!(client.submission_count(), 2);
        assert_eq!(client.submissions()[0].quantity, 2000);
    }

    #[tokio::test]
    async fn test_fail_on_submit() {
        let client = InMemoryFulfillmentClient::new();
        client.set_fail_on_submit(true);

        let result = client.submit(&submission("S1")).await;
        assert!(matches!(result, Err(FulfillmentError::Rejected(_))));
        assert_eq!(client.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_fail_on_single_service() {
        let client = InMemoryFulfillmentClient::new();
        client.set_fail_on_service("S2");

        assert!(client.submit(&submission("S1")).await.is_ok());
        assert!(client.submit(&submission("S2")).await.is_err());
        assert_eq!(client.submission_count(), 1);
    }
}
