//! HTTP request decoder
//!
//! Parses the request line and header block of an HTTP/1.0 or HTTP/1.1 request
//! with `httparse`. The decoder is stateless between calls: every call parses the
//! whole accumulated buffer again, since a boundary earlier in the stream may
//! only now be complete.
//!
//! # Outcomes
//!
//! - `Ok(None)`: incomplete, more bytes are needed
//! - `Err(ParseError)`: malformed, the request can never become valid
//! - `Ok(Some(request))`: complete, the head has been split off the buffer
//!
//! # Limits
//!
//! - Maximum number of headers: 64 by default
//! - Maximum request head size: 64KB by default, checked against the
//!   accumulated buffer while the request is still incomplete

use bytes::BytesMut;
use http::{Method, Version};
use httparse::{Error, Status};
use std::ops::Range;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::connection::ConnectionConfig;
use crate::ensure;
use crate::protocol::{Header, ParseError, ParsedRequest};

/// Decoder for HTTP request heads implementing the [`Decoder`] trait.
#[derive(Debug, Clone)]
pub struct RequestDecoder {
    max_headers: usize,
    max_request_size: usize,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_headers: usize, max_request_size: usize) -> Self {
        Self { max_headers, max_request_size }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::from(&ConnectionConfig::default())
    }
}

impl From<&ConnectionConfig> for RequestDecoder {
    fn from(config: &ConnectionConfig) -> Self {
        Self::with_limits(config.max_headers(), config.max_request_size())
    }
}

impl Decoder for RequestDecoder {
    type Item = ParsedRequest;
    type Error = ParseError;

    /// Attempts to decode a request head from the whole of `src`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The number of headers exceeds the configured maximum
    /// - The buffered request exceeds the configured maximum size
    /// - The request line or a header line is malformed
    /// - The HTTP version is not 1.0 or 1.1
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut headers = vec![httparse::EMPTY_HEADER; self.max_headers];
        let mut req = httparse::Request::new(&mut headers);

        let parsed_result = req.parse(src).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(self.max_headers),
            e => ParseError::invalid_header(e.to_string()),
        });

        match parsed_result? {
            Status::Complete(head_size) => {
                trace!(head_size, "parsed request head");
                ensure!(head_size <= self.max_request_size, ParseError::too_large_request(head_size, self.max_request_size));

                let method = req.method.ok_or(ParseError::InvalidMethod)?;
                let method = Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?;

                let version = match req.version {
                    Some(0) => Version::HTTP_10,
                    Some(1) => Version::HTTP_11,
                    v => return Err(ParseError::InvalidVersion(v)),
                };

                let base = src.as_ptr() as usize;
                let path = req.path.map(|path| range_of(base, path.as_bytes())).ok_or(ParseError::InvalidUri)?;
                let header_ranges: Vec<(Range<usize>, Range<usize>)> =
                    req.headers.iter().map(|header| (range_of(base, header.name.as_bytes()), range_of(base, header.value))).collect();

                // anything after the head is a body, which is never read
                let head = src.split_to(head_size).freeze();
                let headers = header_ranges.into_iter().map(|(name, value)| Header::new(head.slice(name), head.slice(value))).collect();

                let request = ParsedRequest::new(method, head.slice(path), version, headers);
                trace!(
                    method = %request.method(),
                    path = %String::from_utf8_lossy(request.path()),
                    version = ?request.version(),
                    header_count = request.headers().len(),
                    "decoded request"
                );
                Ok(Some(request))
            }
            Status::Partial => {
                ensure!(src.len() <= self.max_request_size, ParseError::too_large_request(src.len(), self.max_request_size));
                trace!(buffered = src.len(), "incomplete request, need more data");
                Ok(None)
            }
        }
    }
}

/// Byte range of `part` inside the buffer starting at address `base`.
///
/// `part` must borrow from that buffer, which holds for everything `httparse` returns.
fn range_of(base: usize, part: &[u8]) -> Range<usize> {
    let start = part.as_ptr() as usize - base;
    start..start + part.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use indoc::indoc;

    fn decode_str(str: &str) -> Result<Option<ParsedRequest>, ParseError> {
        let mut buf = BytesMut::from(str);
        RequestDecoder::new().decode(&mut buf)
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let request = decode_str(str).unwrap().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.version(), Version::HTTP_11);
        assert_eq!(request.path(), b"/index.html");
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers()[0], Header::new(Bytes::from_static(b"Host"), Bytes::from_static(b"127.0.0.1:8080")));
        assert_eq!(request.headers()[1].value(), b"curl/7.79.1");
        assert_eq!(request.headers()[2].value(), b"*/*");
    }

    #[test]
    fn duplicated_headers_keep_wire_order() {
        let request = decode_str("GET /key HTTP/1.1\r\nAccept: a\r\nHost: h\r\nAccept: b\r\n\r\n").unwrap().unwrap();

        let headers: Vec<(&[u8], &[u8])> = request.headers().iter().map(|header| (header.name(), header.value())).collect();
        assert_eq!(headers, vec![(&b"Accept"[..], &b"a"[..]), (&b"Host"[..], &b"h"[..]), (&b"Accept"[..], &b"b"[..])]);

        let accepts: Vec<&[u8]> = request.header_values("accept").collect();
        assert_eq!(accepts, vec![&b"a"[..], &b"b"[..]]);
    }

    #[test]
    fn body_bytes_stay_in_buffer() {
        let str = indoc! {r##"
        POST /counter HTTP/1.0
        Content-Length: 3

        123"##};

        let mut bytes = BytesMut::from(str);
        let request = RequestDecoder::new().decode(&mut bytes).unwrap().unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.version(), Version::HTTP_10);
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn extension_method_is_accepted() {
        let request = decode_str("PURGE /cache HTTP/1.1\r\n\r\n").unwrap().unwrap();
        assert_eq!(request.method().as_str(), "PURGE");
    }

    #[test]
    fn incomplete_request_needs_more_data() {
        assert!(decode_str("").unwrap().is_none());
        assert!(decode_str("GET /ind").unwrap().is_none());
        assert!(decode_str("GET /index HTTP/1.1\r\nHost: localhost\r\n").unwrap().is_none());
    }

    #[test]
    fn malformed_request_line() {
        let result = decode_str("GET\x01/index HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHeader { .. })), "{result:?}");

        let result = decode_str("GET /index FTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHeader { .. })), "{result:?}");
    }

    #[test]
    fn too_many_headers() {
        let mut str = String::from("GET / HTTP/1.1\r\n");
        for i in 0..3 {
            str.push_str(&format!("X-Header-{i}: {i}\r\n"));
        }
        str.push_str("\r\n");

        let mut buf = BytesMut::from(str.as_str());
        let result = RequestDecoder::with_limits(2, 1024).decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 2 })), "{result:?}");

        let mut buf = BytesMut::from(str.as_str());
        assert!(RequestDecoder::with_limits(3, 1024).decode(&mut buf).unwrap().is_some());
    }

    #[test]
    fn partial_request_over_limit_is_rejected() {
        let mut buf = BytesMut::from(format!("GET /{} HTTP/1.1\r\n", "a".repeat(64)).as_str());
        let result = RequestDecoder::with_limits(64, 32).decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooLargeRequest { max_size: 32, .. })), "{result:?}");
    }

    #[test]
    fn complete_request_over_limit_is_rejected() {
        let mut buf = BytesMut::from("GET /abcdefghijklmnopqrstuvwxyz HTTP/1.1\r\n\r\n");
        let result = RequestDecoder::with_limits(64, 16).decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooLargeRequest { max_size: 16, .. })), "{result:?}");
    }

    #[test]
    fn redecoding_the_whole_buffer_finds_late_boundary() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from("GET /split HTTP/1.0\r\n\r");
        assert!(decoder.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"\n");
        let request = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(request.path(), b"/split");
        assert!(buf.is_empty());
    }
}
