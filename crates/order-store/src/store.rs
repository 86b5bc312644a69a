use async_trait::async_trait;
use domain::{Order, TransactionId};

use crate::Result;

/// Core trait for order store implementations.
///
/// All implementations must be thread-safe (Send + Sync). Keys are payment
/// transaction ids; each key holds at most one order record.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Retrieves the order stored under the given transaction id.
    async fn get(&self, transaction_id: &TransactionId) -> Result<Option<Order>>;

    /// Stores an order under the given transaction id.
    ///
    /// This is an upsert: an existing record is replaced in place. Concurrent
    /// puts on the same key are last-write-wins with no conflict detection.
    async fn put(&self, transaction_id: &TransactionId, order: Order) -> Result<()>;

    /// Atomically admits a pending order for fulfillment.
    ///
    /// If an order exists under the key and is still `pending`, it is
    /// transitioned to `processing` in place and the updated record is
    /// returned. Returns `None` when the key is absent or the order has
    /// already been admitted or settled, so a duplicate webhook delivery
    /// for the same transaction observes `None` and proceeds no further.
    async fn begin_processing(&self, transaction_id: &TransactionId) -> Result<Option<Order>>;
}
