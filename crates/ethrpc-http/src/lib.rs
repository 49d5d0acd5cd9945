pub mod config;
pub mod error;
pub mod rpc;

pub use config::EndpointConfig;
pub use error::{ConnectionFault, TransportError};
pub use rpc::{BatchEntry, HttpClient, RequestId, Transport};
