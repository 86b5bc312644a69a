//! Fulfillment client trait and its HTTP and in-memory implementations.

pub mod fulfillment;
pub mod http;

pub use fulfillment::{FulfillmentClient, InMemoryFulfillmentClient, Submission};
pub use http::HttpFulfillmentClient;
