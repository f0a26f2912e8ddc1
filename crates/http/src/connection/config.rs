/// Default growth increment of a connection buffer, also the size of one read
pub const DEFAULT_READ_CHUNK: usize = 4 * 1024;

/// Default maximum size of a buffered request before it is rejected
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 64 * 1024;

/// Default maximum number of header lines in a request
pub const DEFAULT_MAX_HEADERS: usize = 64;

/// The smallest growth increment that still leaves room for one byte next to the terminator
pub const MIN_READ_CHUNK: usize = 2;

/// Per-connection limits shared by every connection of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    read_chunk: usize,
    max_request_size: usize,
    max_headers: usize,
}

impl ConnectionConfig {
    /// `read_chunk` is raised to [`MIN_READ_CHUNK`] when smaller.
    pub fn new(read_chunk: usize, max_request_size: usize, max_headers: usize) -> Self {
        Self { read_chunk: read_chunk.max(MIN_READ_CHUNK), max_request_size, max_headers }
    }

    pub fn read_chunk(&self) -> usize {
        self.read_chunk
    }

    pub fn max_request_size(&self) -> usize {
        self.max_request_size
    }

    pub fn max_headers(&self) -> usize {
        self.max_headers
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_READ_CHUNK, DEFAULT_MAX_REQUEST_SIZE, DEFAULT_MAX_HEADERS)
    }
}
