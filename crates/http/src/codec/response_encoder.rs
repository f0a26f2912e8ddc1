//! HTTP response encoder
//!
//! Serializes a [`ResponseOutcome`] into HTTP/1.0 wire bytes. The message is
//! delimited by the connection close, so no `Content-Length` header is ever
//! written:
//!
//! ```text
//! HTTP/1.0 <code> <reason>\r\n
//! [Header: Value\r\n]*
//! \r\n
//! [body bytes\r\n]
//! ```

use crate::protocol::{ResponseOutcome, SendError};

use bytes::{BufMut, BytesMut};
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size reserved for the status line and headers
const INIT_HEAD_SIZE: usize = 64;

const CONTENT_TYPE_TEXT_PLAIN: &[u8] = b"Content-type: text/plain\r\n";

#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<ResponseOutcome> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: ResponseOutcome, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let status = item.status();
        let body = item.body();

        dst.reserve(INIT_HEAD_SIZE + body.map_or(0, |body| body.len() + 2));
        write!(FastWrite(dst), "HTTP/1.0 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or_default())?;

        match body {
            Some(body) => {
                dst.put_slice(CONTENT_TYPE_TEXT_PLAIN);
                dst.put_slice(b"\r\n");
                dst.put_slice(body);
                dst.put_slice(b"\r\n");
            }
            None => dst.put_slice(b"\r\n"),
        }
        Ok(())
    }
}

/// Writer adapter over `BytesMut`, space for the status line has already been reserved.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
