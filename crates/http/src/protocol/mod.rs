//! Core protocol types shared by the codec, connection and handler layers.
//!
//! - **Requests** ([`request`]): [`ParsedRequest`] and its [`Header`] lines
//! - **Responses** ([`response`]): [`ResponseOutcome`], the three answers a connection can give
//! - **Errors** ([`error`]):
//!   - [`ParseError`]: malformed input, answered with `400 Bad Request`
//!   - [`SocketError`]: read and buffer failures, fatal to one connection
//!   - [`SendError`]: response write failures
//!   - [`HttpError`]: top-level error of a connection task

mod request;
pub use request::Header;
pub use request::ParsedRequest;

mod response;
pub use response::ResponseOutcome;

mod error;
pub use error::BufferError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::SocketError;
