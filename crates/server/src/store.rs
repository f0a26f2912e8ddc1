use std::collections::HashMap;

use bytes::Bytes;
use micro_kv_http::handler::{Lookup, Store, StoredValue};
use serde_json::Value as Json;
use thiserror::Error;
use tracing::trace;

/// A value held by the in-memory store.
///
/// Only scalars can be served over http; lists and hashes answer `WrongType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(StoredValue),
    List(Vec<Bytes>),
    Hash(Vec<(Bytes, Bytes)>),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("seed must be a json object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<Bytes, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<Bytes>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Stores a string, keeping it as an integer when it is the canonical text of one.
    pub fn set(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) -> Option<Value> {
        let value = value.into();
        let scalar = match canonical_i64(&value) {
            Some(n) => StoredValue::Int(n),
            None => StoredValue::Raw(value),
        };
        self.insert(key, Value::Scalar(scalar))
    }

    /// Builds a store from a json object.
    ///
    /// Strings and numbers become scalars, arrays become lists and objects become hashes.
    /// `null` entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` when the text is not json or its top level is not an object.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        let entries = match serde_json::from_str::<Json>(text)? {
            Json::Object(entries) => entries,
            other => return Err(SeedError::NotAnObject(kind_of(&other))),
        };

        let mut store = Self::new();
        for (key, value) in entries {
            match value {
                Json::Null => trace!(key = %key, "skip null seed value"),
                Json::String(s) => {
                    store.set(key, s);
                }
                Json::Number(n) => {
                    let scalar = match n.as_i64() {
                        Some(n) => StoredValue::Int(n),
                        None => StoredValue::Raw(Bytes::from(n.to_string())),
                    };
                    store.insert(key, Value::Scalar(scalar));
                }
                Json::Bool(b) => {
                    store.set(key, b.to_string());
                }
                Json::Array(items) => {
                    store.insert(key, Value::List(items.iter().map(element_bytes).collect()));
                }
                Json::Object(fields) => {
                    let fields = fields.iter().map(|(name, value)| (Bytes::from(name.clone()), element_bytes(value))).collect();
                    store.insert(key, Value::Hash(fields));
                }
            }
        }
        Ok(store)
    }
}

impl Store for MemoryStore {
    fn lookup(&self, key: &[u8]) -> Lookup {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(Value::Scalar(value)) => Lookup::Found(value.clone()),
            Some(Value::List(_) | Value::Hash(_)) => Lookup::WrongType,
        }
    }
}

/// Parses `bytes` as an `i64` only if rendering the number gives back the same bytes.
fn canonical_i64(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() || bytes.len() > 20 {
        return None;
    }
    let n = std::str::from_utf8(bytes).ok()?.parse::<i64>().ok()?;
    (n.to_string().as_bytes() == bytes).then_some(n)
}

fn element_bytes(value: &Json) -> Bytes {
    match value {
        Json::String(s) => Bytes::from(s.clone()),
        other => Bytes::from(other.to_string()),
    }
}

fn kind_of(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
