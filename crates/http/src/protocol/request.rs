//! Parsed HTTP request head.
//!
//! A [`ParsedRequest`] is produced once per connection by the
//! [`RequestDecoder`](crate::codec::RequestDecoder). All of its byte fields are
//! slices of the frozen request head, so building one never copies the path or
//! the header values.

use bytes::Bytes;
use http::{Method, Version};

/// A single header line, kept exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: Bytes,
    value: Bytes,
}

impl Header {
    pub fn new(name: Bytes, value: Bytes) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// The request line and header block of an HTTP/1.x request.
///
/// Headers are stored in arrival order. Repeated names are kept as separate
/// entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    method: Method,
    path: Bytes,
    version: Version,
    headers: Vec<Header>,
}

impl ParsedRequest {
    pub fn new(method: Method, path: Bytes, version: Version, headers: Vec<Header>) -> Self {
        Self { method, path, version, headers }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw request target, without any percent decoding.
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Returns every value of the header `name`, compared case-insensitively, in arrival order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.headers.iter().filter(move |header| header.name.eq_ignore_ascii_case(name.as_bytes())).map(Header::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_headers(headers: &[(&'static str, &'static str)]) -> ParsedRequest {
        let headers = headers
            .iter()
            .map(|(name, value)| Header::new(Bytes::from_static(name.as_bytes()), Bytes::from_static(value.as_bytes())))
            .collect();
        ParsedRequest::new(Method::GET, Bytes::from_static(b"/index"), Version::HTTP_11, headers)
    }

    #[test]
    fn duplicated_headers_keep_arrival_order() {
        let request = request_with_headers(&[("Accept", "text/plain"), ("Host", "localhost"), ("accept", "*/*")]);

        let values: Vec<&[u8]> = request.header_values("ACCEPT").collect();
        assert_eq!(values, vec![&b"text/plain"[..], &b"*/*"[..]]);

        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers()[1].name(), b"Host");
    }

    #[test]
    fn missing_header_yields_nothing() {
        let request = request_with_headers(&[("Host", "localhost")]);
        assert_eq!(request.header_values("user-agent").count(), 0);
        assert_eq!(request.path(), b"/index");
    }
}
