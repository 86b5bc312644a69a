//! Webhook reconciler: matches payment events to orders and drives the
//! fulfillment fan-out.

use domain::{OrderStatus, TransactionId};
use futures_util::future::join_all;
use order_store::OrderStore;
use subtle::ConstantTimeEq;

use crate::error::ReconcilerError;
use crate::event::WebhookEvent;
use crate::services::fulfillment::{FulfillmentClient, Submission};

/// What a webhook delivery amounted to.
///
/// Every variant is acknowledged with a success status upstream; the gateway
/// redelivers on anything else, and redelivery is handled by the admission
/// guard rather than by error responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Event name or transaction status did not confirm a settled payment.
    Ignored,

    /// No order is registered under the transaction id.
    UnknownTransaction,

    /// The order was already admitted or settled; duplicate delivery no-op.
    AlreadyHandled(OrderStatus),

    /// Every line item was fulfilled.
    Completed { transaction_id: TransactionId },

    /// At least one line item failed; the order settled as failed.
    Failed {
        transaction_id: TransactionId,
        reason: String,
    },
}

/// Drives payment-confirmed orders through fulfillment.
pub struct Reconciler<S, F>
where
    S: OrderStore,
    F: FulfillmentClient,
{
    store: S,
    client: F,
    webhook_token: String,
}

impl<S, F> Reconciler<S, F>
where
    S: OrderStore,
    F: FulfillmentClient,
{
    /// Creates a new reconciler.
    pub fn new(store: S, client: F, webhook_token: impl Into<String>) -> Self {
        Self {
            store,
            client,
            webhook_token: webhook_token.into(),
        }
    }

    /// Reconciles one webhook delivery.
    ///
    /// The pending -> processing transition is persisted before any
    /// fulfillment call is dispatched; the terminal transition is persisted
    /// only after every call has settled.
    #[tracing::instrument(skip(self, event), fields(transaction_id = %event.transaction.id))]
    pub async fn reconcile(
        &self,
        event: WebhookEvent,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        metrics::counter!("webhook_events_total").increment(1);

        if !self.token_matches(&event.token) {
            metrics::counter!("webhook_rejected_total").increment(1);
            return Err(ReconcilerError::InvalidToken);
        }

        if !event.is_paid() {
            metrics::counter!("webhook_ignored_total").increment(1);
            tracing::debug!(event = %event.event, "event does not confirm a settled payment");
            return Ok(ReconcileOutcome::Ignored);
        }

        let transaction_id = event.transaction.id;

        let Some(order) = self.store.get(&transaction_id).await? else {
            tracing::info!("no order registered for transaction");
            return Ok(ReconcileOutcome::UnknownTransaction);
        };

        // Single-admission guard: only the delivery that wins the atomic
        // pending -> processing claim proceeds to fulfillment.
        let Some(mut order) = self.store.begin_processing(&transaction_id).await? else {
            tracing::info!(status = %order.status, "duplicate delivery for admitted order");
            return Ok(ReconcileOutcome::AlreadyHandled(order.status));
        };

        let start = std::time::Instant::now();

        let submissions: Vec<Submission> = order
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| Submission {
                provider_service_id: item.provider_service_id.clone(),
                link: item.link.clone(),
                quantity: item.scaled_quantity(),
                idempotency_key: format!("{}:{index}", order.id),
            })
            .collect();

        metrics::counter!("fulfillment_submissions_total").increment(submissions.len() as u64);

        // Unbounded fan-out, no ordering dependency between items. Wait for
        // all to settle before deciding the terminal status.
        let results = join_all(submissions.iter().map(|s| self.client.submit(s))).await;

        let mut provider_order_ids = Vec::with_capacity(results.len());
        let mut first_error = None;
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(id) => provider_order_ids.push(id),
                Err(e) => {
                    tracing::warn!(item = index, error = %e, "line item fulfillment failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        let outcome = match first_error {
            None => {
                order.complete(provider_order_ids)?;
                self.store.put(&transaction_id, order).await?;
                metrics::counter!("orders_completed_total").increment(1);
                tracing::info!("order completed");
                ReconcileOutcome::Completed { transaction_id }
            }
            Some(error) => {
                // Sibling successes stay billed upstream but are discarded
                // for status purposes; log them so operators can reconcile.
                for id in &provider_order_ids {
                    tracing::warn!(provider_order_id = %id, "unreconciled upstream submission on failed order");
                }
                order.fail()?;
                self.store.put(&transaction_id, order).await?;
                metrics::counter!("orders_failed_total").increment(1);
                tracing::warn!(error = %error, "order failed");
                ReconcileOutcome::Failed {
                    transaction_id,
                    reason: error.to_string(),
                }
            }
        };

        metrics::histogram!("reconcile_duration_seconds").record(start.elapsed().as_secs_f64());
        Ok(outcome)
    }

    /// Constant-time comparison of the webhook token against the shared secret.
    fn token_matches(&self, token: &str) -> bool {
        token
            .as_bytes()
            .ct_eq(self.webhook_token.as_bytes())
            .into()
    }
}
