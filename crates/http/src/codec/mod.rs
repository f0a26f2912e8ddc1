//! HTTP codec module for decoding requests and encoding responses
//!
//! - [`RequestDecoder`]: parses an accumulated buffer into a
//!   [`ParsedRequest`](crate::protocol::ParsedRequest), re-parsing the whole
//!   buffer on every attempt
//! - [`ResponseEncoder`]: serializes a
//!   [`ResponseOutcome`](crate::protocol::ResponseOutcome) into HTTP/1.0 bytes
//!
//! # Example
//!
//! ```
//! use micro_kv_http::codec::{RequestDecoder, ResponseEncoder};
//! use micro_kv_http::protocol::ResponseOutcome;
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::from("GET /greeting HTTP/1.0\r\n\r\n");
//! let request = decoder.decode(&mut request_buffer).unwrap().unwrap();
//! assert_eq!(request.path(), b"/greeting");
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! encoder.encode(ResponseOutcome::NotFound, &mut response_buffer).unwrap();
//! assert_eq!(&response_buffer[..], b"HTTP/1.0 404 Not Found\r\n\r\n");
//! ```

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
