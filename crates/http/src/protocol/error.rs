use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("socket error: {source}")]
    SocketError {
        #[from]
        source: SocketError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// A request that can never become valid, answered with `400 Bad Request`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("request size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeRequest { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,
}

impl ParseError {
    pub fn too_large_request(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeRequest { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("buffer capacity {capacity} can't grow by {increment} bytes")]
    CapacityOverflow { capacity: usize, increment: usize },
}

impl BufferError {
    pub fn capacity_overflow(capacity: usize, increment: usize) -> Self {
        Self::CapacityOverflow { capacity, increment }
    }
}

/// Fatal for the connection it happened on, never for the process.
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("read error: {source}")]
    Read { source: io::Error },

    #[error("buffer error: {source}")]
    Buffer {
        #[from]
        source: BufferError,
    },
}

impl SocketError {
    pub fn read<E: Into<io::Error>>(e: E) -> Self {
        Self::Read { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
