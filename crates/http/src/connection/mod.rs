//! HTTP connection handling module
//!
//! A connection serves exactly one request. Every readiness notification
//! performs one non-blocking read into a growable buffer and re-parses the
//! whole buffer; the connection either suspends until the next notification or
//! produces its single response and closes.
//!
//! # Components
//!
//! - [`ConnectionBuffer`]: growable byte accumulator, grown one increment at a time
//! - [`RequestAssembler`]: reads into the buffer and classifies parse attempts as [`Assembly`]
//! - [`HttpConnection`]: the per-connection state machine returning a [`Step`],
//!   and the task driving it over a socket
//! - [`NonBlockingRead`]: the readiness/read seam to the event loop
//! - [`ConnectionConfig`]: growth increment and request limits

mod assembler;
mod buffer;
mod config;
mod http_connection;
mod io;

#[cfg(test)]
mod test_io;

pub use assembler::Assembly;
pub use assembler::RequestAssembler;
pub use buffer::ConnectionBuffer;
pub use config::ConnectionConfig;
pub use config::DEFAULT_MAX_HEADERS;
pub use config::DEFAULT_MAX_REQUEST_SIZE;
pub use config::DEFAULT_READ_CHUNK;
pub use config::MIN_READ_CHUNK;
pub use http_connection::HttpConnection;
pub use http_connection::Step;
pub use io::NonBlockingRead;
