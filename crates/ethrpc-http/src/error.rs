use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use serde_json::error::Category;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP exchange never completed: DNS, connect, reset, broken pipe,
    /// premature EOF, TLS or timeout.
    #[error("connection error: [{kind}] {message}")]
    Connection {
        kind: ConnectionFault,
        message: String,
    },

    /// The endpoint answered with anything other than `200 OK`.
    #[error("unexpected HTTP status {status}: {body}")]
    Protocol { status: StatusCode, body: String },

    /// A batch response came back with `200 OK` but is not a usable JSON array.
    #[error("invalid batch response: [{category:?}] {message}")]
    Decode { category: Category, message: String },

    #[error("failed to encode batch request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Connection {
            kind: ConnectionFault::classify(&err),
            message: error_chain(&err),
        }
    }
}

/// `reqwest` keeps the OS-level cause (refused, reset, ...) in `source()`;
/// its own `Display` only names the request.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |e: &&(dyn Error + 'static)| (*e).source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Coarse class of a transport-level failure, kept for diagnostics only.
/// Callers are not expected to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFault {
    Timeout,
    Connect,
    Request,
    Body,
    Redirect,
    Other,
}

impl ConnectionFault {
    pub fn classify(err: &reqwest::Error) -> Self {
        // `is_timeout` must win: a connect timeout also reports `is_connect`.
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect
        } else if err.is_redirect() {
            Self::Redirect
        } else if err.is_body() || err.is_decode() {
            Self::Body
        } else if err.is_request() {
            Self::Request
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for ConnectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Redirect => "redirect",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}
