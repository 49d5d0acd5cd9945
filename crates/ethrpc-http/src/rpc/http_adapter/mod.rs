//! JSON-RPC transport over HTTP(S) using `reqwest`.
//!
//! Implements [`Transport`](super::Transport) with a single POST per call,
//! non-200 statuses surfaced as protocol errors, and optional sticky-session
//! cookies.

mod client;
mod session;

pub use client::HttpClient;
