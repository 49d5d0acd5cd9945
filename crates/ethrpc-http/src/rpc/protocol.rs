use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::TransportError;

/// JSON-RPC correlation id. The transport only needs it for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(Number),
    String(String),
    Null,
}

impl RequestId {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Number(_) => 1,
            Self::String(_) => 2,
        }
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::String(id.to_owned())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self::String(id)
    }
}

/// One element of a batch request or response.
///
/// Only `id` is typed; every other member (`jsonrpc`, `method`, `params`,
/// `result`, `error`, ...) is carried through untouched in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub id: RequestId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BatchEntry {
    pub fn new(id: impl Into<RequestId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Total order used to restore batch order.
///
/// `null` sorts first, then numbers (numerically), then strings
/// (lexicographically). Mixed id types are not expected from a well-behaved
/// node; this order only keeps the sort deterministic when they appear.
pub fn compare_ids(a: &RequestId, b: &RequestId) -> Ordering {
    match (a, b) {
        (RequestId::Number(x), RequestId::Number(y)) => compare_numbers(x, y),
        (RequestId::String(x), RequestId::String(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    if a.is_f64() || b.is_f64() {
        return a.as_f64().partial_cmp(&b.as_f64()).unwrap_or(Ordering::Equal);
    }
    // One side is negative, the other exceeds i64::MAX.
    if a.as_i64().is_some() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

pub fn encode_batch(batch: &[BatchEntry]) -> Result<String, TransportError> {
    serde_json::to_string(batch).map_err(TransportError::Encode)
}

/// Parse a batch response body and sort it ascending by `id`.
///
/// The sort is stable, so duplicate ids keep the order the node sent them in.
/// Missing responses are not detected here.
pub fn decode_batch(body: &str) -> Result<Vec<BatchEntry>, TransportError> {
    let mut entries: Vec<BatchEntry> =
        serde_json::from_str(body).map_err(|e| TransportError::Decode {
            category: e.classify(),
            message: e.to_string(),
        })?;
    entries.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(entries)
}
