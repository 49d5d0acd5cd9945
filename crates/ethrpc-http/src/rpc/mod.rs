//! JSON-RPC transport abstraction layer.
//!
//! Defines the [`Transport`] trait and provides an HTTP(S) implementation
//! ([`HttpClient`]) plus a test mock (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod protocol;

pub use http_adapter::HttpClient;
pub use protocol::{BatchEntry, RequestId};

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;

/// Moves already-serialized JSON-RPC payloads to a node and back.
///
/// Implementations only need [`send_single`](Transport::send_single); the
/// batch path is built on top of it.
#[async_trait]
pub trait Transport: Send {
    /// Send one JSON-RPC payload and return the raw response body unaltered.
    async fn send_single(&mut self, payload: &str) -> Result<String, TransportError>;

    /// Send a batch as one JSON array and return the responses sorted
    /// ascending by `id`, regardless of the order the node answered in.
    ///
    /// Entries carrying a JSON-RPC `error` member are returned as-is. An
    /// empty batch returns an empty result without touching the network.
    async fn send_batch(
        &mut self,
        batch: &[BatchEntry],
    ) -> Result<Vec<BatchEntry>, TransportError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let payload = protocol::encode_batch(batch)?;
        let body = self.send_single(&payload).await?;
        let entries = protocol::decode_batch(&body)?;
        debug!(
            rpc.batch_size = batch.len(),
            rpc.batch_responses = entries.len(),
            "rpc batch response"
        );
        Ok(entries)
    }
}
