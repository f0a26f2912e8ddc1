//! The read-only HTTP front end of micro-kv
//!
//! This crate turns bytes arriving on a non-blocking socket into a single
//! key-value lookup and writes back a one-shot HTTP/1.0 response. The URL path
//! of a request is the key: if the key holds a scalar value its bytes are the
//! response body, otherwise the client gets an error status.
//!
//! # Pipeline
//!
//! ```text
//! readable ──▶ ConnectionBuffer ──▶ RequestDecoder ──▶ Dispatcher ──▶ ResponseEncoder ──▶ close
//!                  ▲                     │
//!                  └──── incomplete ─────┘
//! ```
//!
//! Every readiness notification performs one non-blocking read into the
//! connection buffer and re-parses the whole buffer. An incomplete request
//! suspends the connection until the next notification, a malformed one is
//! answered with `400 Bad Request` without touching the store, and a complete
//! one is dispatched to exactly one store lookup.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use bytes::Bytes;
//! use micro_kv_http::connection::{ConnectionConfig, HttpConnection, Step};
//! use micro_kv_http::handler::{Dispatcher, Lookup, Store, StoredValue};
//! use micro_kv_http::protocol::ResponseOutcome;
//!
//! struct Counter;
//!
//! impl Store for Counter {
//!     fn lookup(&self, key: &[u8]) -> Lookup {
//!         match key {
//!             b"counter" => Lookup::Found(StoredValue::Int(42)),
//!             _ => Lookup::Absent,
//!         }
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new(Rc::new(Counter));
//! let mut connection = HttpConnection::new(&ConnectionConfig::default(), dispatcher);
//!
//! assert_eq!(connection.on_bytes(b"GET /coun").unwrap(), Step::Suspend);
//! let step = connection.on_bytes(b"ter HTTP/1.0\r\n\r\n").unwrap();
//! assert_eq!(step, Step::Close(Some(ResponseOutcome::Ok(Bytes::from_static(b"42")))));
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: buffer growth, request assembly and the one-shot connection state machine
//! - [`codec`]: request decoding and response encoding
//! - [`handler`]: the store seam and the request dispatcher
//! - [`protocol`]: request, response and error types
//!
//! # Limitations
//!
//! - One request per connection, no keep-alive or pipelining
//! - Request bodies are never read
//! - Maximum request head size: 64KB by default
//! - Maximum number of headers: 64 by default

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
