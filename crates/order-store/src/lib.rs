//! Order storage for the fulfillment pipeline.
//!
//! The store maps a payment transaction id to its order record. The contract
//! is deliberately small (get / put / begin_processing) so the reconciler is
//! agnostic to the backing implementation; the in-memory implementation is
//! process-lifetime only.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use store::OrderStore;
