use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::TransportError;

use super::Transport;

/// A scripted transport for testing. Replays queued responses in order and
/// records every payload it was asked to send.
#[derive(Default)]
pub struct MockTransport {
    responses: VecDeque<Result<String, TransportError>>,
    requests: Vec<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: Result<String, TransportError>) -> Self {
        self.responses.push_back(response);
        self
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_single(&mut self, payload: &str) -> Result<String, TransportError> {
        self.requests.push(payload.to_owned());
        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("mock transport has no response queued for {payload}"))
    }
}
