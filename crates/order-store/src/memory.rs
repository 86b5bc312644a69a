use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Order, TransactionId};
use tokio::sync::RwLock;

use crate::{Result, store::OrderStore};

/// In-memory order store.
///
/// Orders live for the lifetime of the process; durability is an external
/// concern. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<TransactionId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, transaction_id: &TransactionId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(transaction_id).cloned())
    }

    async fn put(&self, transaction_id: &TransactionId, order: Order) -> Result<()> {
        self.orders
            .write()
            .await
            .insert(transaction_id.clone(), order);
        Ok(())
    }

    async fn begin_processing(&self, transaction_id: &TransactionId) -> Result<Option<Order>> {
        let mut orders = self.orders.write().await;

        // The check and the transition happen under the same write lock,
        // so only one delivery per transaction can ever be admitted.
        if let Some(order) = orders.get_mut(transaction_id)
            && order.begin_processing().is_ok()
        {
            return Ok(Some(order.clone()));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Customer, LineItem, Money, OrderStatus};

    fn sample_order(transaction_id: &str) -> Order {
        let items = vec![LineItem::new(
            "S1",
            "https://example.com/p",
            2,
            Money::from_cents(990),
        )];
        let total = items.iter().map(LineItem::total_price).sum();
        Order::new(
            TransactionId::new(transaction_id),
            Customer {
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                phone: "+5511999990000".to_string(),
                identity_document: "123.456.789-00".to_string(),
            },
            items,
            total,
        )
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryOrderStore::new();
        let tx = TransactionId::new("T1");
        let order = sample_order("T1");

        store.put(&tx, order.clone()).await.unwrap();

        let fetched = store.get(&tx).await.unwrap().unwrap();
        assert_eq!(fetched, order);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = InMemoryOrderStore::new();
        let fetched = store.get(&TransactionId::new("T9")).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_in_place() {
        let store = InMemoryOrderStore::new();
        let tx = TransactionId::new("T1");

        store.put(&tx, sample_order("T1")).await.unwrap();
        let replacement = sample_order("T1");
        store.put(&tx, replacement.clone()).await.unwrap();

        assert_eq!(store.order_count().await, 1);
        assert_eq!(store.get(&tx).await.unwrap().unwrap().id, replacement.id);
    }

    #[tokio::test]
    async fn test_begin_processing_admits_pending_order() {
        let store = InMemoryOrderStore::new();
        let tx = TransactionId::new("T1");
        store.put(&tx, sample_order("T1")).await.unwrap();

        let admitted = store.begin_processing(&tx).await.unwrap().unwrap();
        assert_eq!(admitted.status, OrderStatus::Processing);

        // The transition is persisted, not just on the returned clone.
        let stored = store.get(&tx).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_begin_processing_admits_only_once() {
        let store = InMemoryOrderStore::new();
        let tx = TransactionId::new("T1");
        store.put(&tx, sample_order("T1")).await.unwrap();

        assert!(store.begin_processing(&tx).await.unwrap().is_some());
        assert!(store.begin_processing(&tx).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_begin_processing_missing_key_is_none() {
        let store = InMemoryOrderStore::new();
        let result = store
            .begin_processing(&TransactionId::new("T9"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryOrderStore::new();
        let t1 = TransactionId::new("T1");
        let t2 = TransactionId::new("T2");
        store.put(&t1, sample_order("T1")).await.unwrap();
        store.put(&t2, sample_order("T2")).await.unwrap();

        assert!(store.begin_processing(&t1).await.unwrap().is_some());
        // Admitting T1 does not affect T2.
        assert_eq!(
            store.get(&t2).await.unwrap().unwrap().status,
            OrderStatus::Pending
        );
    }
}
