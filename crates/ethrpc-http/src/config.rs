//! Endpoint configuration for the HTTP transport.
//!
//! [`EndpointConfig`] is a plain value: build it in code, parse it from a
//! node URL with [`EndpointConfig::from_url`], or embed it in a larger
//! configuration document through its `Deserialize` impl. Loading that
//! document is left to the caller.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::TransportError;

/// Connect timeout applied when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub use_tls: bool,
    /// Capture `Set-Cookie` from successful responses and echo it back as
    /// `Cookie` on later requests.
    #[serde(default)]
    pub use_cookie_session: bool,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    /// Overall per-request deadline. `None` leaves only the connect timeout.
    #[serde(default)]
    pub request_timeout: Option<Duration>,
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            use_tls: false,
            use_cookie_session: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
        }
    }

    /// Parse an `http://` or `https://` node URL. The scheme decides TLS and
    /// a missing port falls back to the scheme default. Path, query and
    /// credentials are ignored: requests always go to `/`.
    pub fn from_url(url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(url).map_err(|e| {
            TransportError::InvalidEndpoint(format!(
                "invalid url `{url}`: expected HTTP(S) URL ({e})"
            ))
        })?;
        let use_tls = match parsed.scheme() {
            "http" => false,
            "https" => true,
            other => {
                return Err(TransportError::InvalidEndpoint(format!(
                    "unsupported scheme `{other}`; expected http or https"
                )));
            }
        };
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| TransportError::InvalidEndpoint(format!("url `{url}` has no host")))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_owned();
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| TransportError::InvalidEndpoint(format!("url `{url}` has no port")))?;

        Ok(Self::new(host, port).with_tls(use_tls))
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_cookie_session(mut self, use_cookie_session: bool) -> Self {
        self.use_cookie_session = use_cookie_session;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "https"
        } else {
            "http"
        }
    }

    /// `{scheme}://{host}:{port}/`, with IPv6 literals bracketed.
    pub fn base_uri(&self) -> Result<Url, TransportError> {
        if self.host.is_empty() {
            return Err(TransportError::InvalidEndpoint("host must not be empty".to_owned()));
        }
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let raw = format!("{}://{}:{}/", self.scheme(), host, self.port);
        Url::parse(&raw)
            .map_err(|e| TransportError::InvalidEndpoint(format!("invalid base uri `{raw}`: {e}")))
    }
}
