use async_trait::async_trait;
use reqwest::header::{self, HeaderValue};
use reqwest::{StatusCode, Url};
use tracing::{debug, trace, warn};

use crate::config::EndpointConfig;
use crate::error::TransportError;

use super::super::Transport;
use super::session::SessionCookie;

/// JSON-RPC transport for a single HTTP(S) endpoint.
///
/// Every call is one `POST /` with `Content-Type: application/json`. Only
/// `200 OK` counts as success. With cookie sessions enabled, the cookie pairs
/// from the last successful response are echoed back on the next request,
/// which keeps load-balanced nodes pinned to one backend.
///
/// Calls take `&mut self` because they update the session cookie. Share a
/// client between tasks behind a lock, or give each task its own client.
pub struct HttpClient {
    client: reqwest::Client,
    config: EndpointConfig,
    uri: Url,
    session: SessionCookie,
}

impl HttpClient {
    pub fn new(config: EndpointConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            TransportError::InvalidEndpoint(format!("failed to build http client: {e}"))
        })?;
        Self::with_client(config, client)
    }

    /// Use a caller-built `reqwest::Client`, e.g. one with custom root
    /// certificates or a proxy. The timeouts in `config` are not applied.
    pub fn with_client(
        config: EndpointConfig,
        client: reqwest::Client,
    ) -> Result<Self, TransportError> {
        let uri = config.base_uri()?;
        Ok(Self {
            client,
            session: SessionCookie::new(config.use_cookie_session),
            config,
            uri,
        })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn use_tls(&self) -> bool {
        self.config.use_tls
    }

    pub fn use_cookie_session(&self) -> bool {
        self.config.use_cookie_session
    }

    /// Current session cookie, byte-for-byte as captured. Always `None`
    /// with cookie sessions disabled.
    pub fn cookie(&self) -> Option<&HeaderValue> {
        self.session.get()
    }

    /// Seed or clear the session cookie, e.g. to carry a sticky session over
    /// from another client. Ignored with cookie sessions disabled.
    pub fn set_cookie(&mut self, cookie: Option<HeaderValue>) {
        self.session.set(cookie);
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send_single(&mut self, payload: &str) -> Result<String, TransportError> {
        let cookie = self.session.header_value();
        debug!(
            rpc.uri = %self.uri,
            payload_len = payload.len(),
            cookie = cookie.is_some(),
            "rpc send"
        );
        trace!(body = %payload, "rpc request body");

        let mut builder = self
            .client
            .post(self.uri.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload.to_owned());
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = builder.send().await?;
        let status = response.status();
        let set_cookie = self.session.capture(response.headers());

        // Bytes, not `text()`: no charset sniffing may rewrite the payload.
        let bytes = response.bytes().await?;
        let body = match String::from_utf8(bytes.to_vec()) {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    rpc.uri = %self.uri,
                    "response body is not valid UTF-8; replacing invalid bytes"
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!(rpc.uri = %self.uri, %status, body_len = body.len(), "rpc response");
        trace!(body = %body, "rpc response body");

        if status != StatusCode::OK {
            return Err(TransportError::Protocol { status, body });
        }

        if let Some(cookie) = set_cookie {
            debug!(rpc.uri = %self.uri, "session cookie updated");
            self.session.set(Some(cookie));
        }

        Ok(body)
    }
}
