//! HTTP fulfillment client for the upstream provisioning API.

use std::time::Duration;

use async_trait::async_trait;
use domain::ProviderOrderId;
use reqwest::Client;
use serde::Deserialize;

use crate::error::FulfillmentError;
use crate::services::fulfillment::{FulfillmentClient, Submission};

/// Fulfillment client that posts form-encoded `add` requests to the
/// provisioning API.
///
/// Every call carries a deadline; a timed-out call surfaces as a transport
/// error and fails the order like any other submission failure.
pub struct HttpFulfillmentClient {
    api_url: String,
    api_key: String,
    client: Client,
}

/// Successful response body. The provider returns the order id either as a
/// number or a string.
#[derive(Deserialize)]
struct AddOrderResponse {
    order: ProviderOrderField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProviderOrderField {
    Number(u64),
    Text(String),
}

impl HttpFulfillmentClient {
    /// Creates a client against the given API base URL with a per-call timeout.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl FulfillmentClient for HttpFulfillmentClient {
    #[tracing::instrument(skip(self, submission), fields(service = %submission.provider_service_id))]
    async fn submit(&self, submission: &Submission) -> Result<ProviderOrderId, FulfillmentError> {
        let quantity = submission.quantity.to_string();
        let form = [
            ("key", self.api_key.as_str()),
            ("action", "add"),
            ("service", submission.provider_service_id.as_str()),
            ("link", submission.link.as_str()),
            ("quantity", quantity.as_str()),
            ("idempotency_key", submission.idempotency_key.as_str()),
        ];

        let response = self.client.post(&self.api_url).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "provisioning request rejected");
            return Err(FulfillmentError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: AddOrderResponse = serde_json::from_str(&body)
            .map_err(|_| FulfillmentError::MalformedResponse(body.clone()))?;

        let id = match parsed.order {
            ProviderOrderField::Number(n) => ProviderOrderId::new(n.to_string()),
            ProviderOrderField::Text(s) => ProviderOrderId::new(s),
        };

        tracing::debug!(provider_order_id = %id, "line item submitted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn submission() -> Submission {
        Submission {
            provider_service_id: "S1".to_string(),
            link: "https://example.com/profile".to_string(),
            quantity: 2000,
            idempotency_key: "ord-1:0".to_string(),
        }
    }

    fn client(server: &MockServer) -> HttpFulfillmentClient {
        HttpFulfillmentClient::new(server.uri(), "api-key", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_submit_posts_form_and_parses_numeric_order_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("key=api-key"))
            .and(body_string_contains("action=add"))
            .and(body_string_contains("service=S1"))
            .and(body_string_contains("quantity=2000"))
            .and(body_string_contains("idempotency_key=ord-1%3A0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "order": 23501
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = client(&server).submit(&submission()).await.unwrap();
        assert_eq!(id.as_str(), "23501");
    }

    #[tokio::test]
    async fn test_submit_accepts_string_order_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "order": "P1"
            })))
            .mount(&server)
            .await;

        let id = client(&server).submit(&submission()).await.unwrap();
        assert_eq!(id.as_str(), "P1");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).submit(&submission()).await;
        assert!(matches!(
            result,
            Err(FulfillmentError::UnexpectedStatus(503))
        ));
    }

    #[tokio::test]
    async fn test_body_without_order_id_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).submit(&submission()).await;
        assert!(matches!(
            result,
            Err(FulfillmentError::MalformedResponse(_))
        ));
    }
}
