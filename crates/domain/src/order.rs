//! The Order record and its lifecycle transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrderError, Result};
use crate::status::OrderStatus;
use crate::value_objects::{LineItem, Money, ProviderOrderId, TransactionId};

/// The customer that placed an order. All fields are mandatory at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identity_document: String,
}

/// The core unit of work: links a payment transaction to the line items
/// to be fulfilled upstream.
///
/// An order is created once (pending) and mutated exactly twice by the
/// reconciler: to `processing` when a matching payment event is admitted,
/// then to `completed` or `failed` once every fulfillment call has settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque unique identifier, generated at creation.
    pub id: Uuid,

    /// Payment-gateway transaction key; immutable once set.
    pub transaction_id: TransactionId,

    pub customer: Customer,

    /// Non-empty ordered sequence of line items.
    pub items: Vec<LineItem>,

    /// Must equal the sum of `unit_price * quantity` over items.
    pub total: Money,

    #[serde(default)]
    pub status: OrderStatus,

    /// One provider order id per fulfilled line item, in item order.
    /// Empty until the order completes.
    #[serde(default)]
    pub provider_order_ids: Vec<ProviderOrderId>,

    /// Compatibility view of the first provider order id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_order_id: Option<ProviderOrderId>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending order with a generated id.
    pub fn new(
        transaction_id: TransactionId,
        customer: Customer,
        items: Vec<LineItem>,
        total: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            customer,
            items,
            total,
            status: OrderStatus::Pending,
            provider_order_ids: Vec::new(),
            provider_order_id: None,
            created_at: Utc::now(),
        }
    }

    /// Validates the order invariants.
    ///
    /// Orders must carry at least one line item, every item must have a
    /// positive quantity and unit price, and the total must equal the sum
    /// of `unit_price * quantity` over items.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        for (index, item) in self.items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity { index });
            }
            if !item.unit_price.is_positive() {
                return Err(OrderError::InvalidPrice { index });
            }
        }

        let expected: Money = self.items.iter().map(LineItem::total_price).sum();
        if expected != self.total {
            return Err(OrderError::TotalMismatch {
                expected,
                actual: self.total,
            });
        }

        Ok(())
    }

    /// Transitions the order from `pending` to `processing`.
    pub fn begin_processing(&mut self) -> Result<()> {
        if !self.status.can_start_processing() {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Processing,
            });
        }
        self.status = OrderStatus::Processing;
        Ok(())
    }

    /// Settles the order as `completed`, recording one provider order id per
    /// fulfilled line item. The first id is mirrored into the singular field
    /// for wire compatibility.
    pub fn complete(&mut self, provider_order_ids: Vec<ProviderOrderId>) -> Result<()> {
        if !self.status.can_complete() {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Completed,
            });
        }
        self.status = OrderStatus::Completed;
        self.provider_order_id = provider_order_ids.first().cloned();
        self.provider_order_ids = provider_order_ids;
        Ok(())
    }

    /// Settles the order as `failed`. No provider order ids are recorded;
    /// succeeded sibling submissions are discarded for status purposes.
    pub fn fail(&mut self) -> Result<()> {
        if !self.status.can_fail() {
            return Err(OrderError::InvalidStateTransition {
                from: self.status,
                to: OrderStatus::Failed,
            });
        }
        self.status = OrderStatus::Failed;
        Ok(())
    }
}
