use std::io;

use tokio_util::codec::Decoder;
use tracing::{trace, warn};

use crate::codec::RequestDecoder;
use crate::connection::{ConnectionBuffer, ConnectionConfig, NonBlockingRead};
use crate::protocol::{BufferError, ParseError, ParsedRequest, SocketError};

/// Result of one attempt to assemble a request from the bytes received so far.
#[derive(Debug)]
pub enum Assembly {
    /// No complete request yet; wait for the next readiness notification.
    Incomplete,
    /// The buffered bytes can never form a valid request.
    Malformed(ParseError),
    Complete(ParsedRequest),
    /// The peer closed its side before a complete request arrived.
    Closed,
}

/// Accumulates the bytes of one connection and re-parses them as they arrive.
#[derive(Debug)]
pub struct RequestAssembler {
    buffer: ConnectionBuffer,
    decoder: RequestDecoder,
}

impl RequestAssembler {
    pub fn new(config: &ConnectionConfig) -> Self {
        Self { buffer: ConnectionBuffer::new(config.read_chunk()), decoder: RequestDecoder::from(config) }
    }

    pub fn buffer(&self) -> &ConnectionBuffer {
        &self.buffer
    }

    /// Handles one readiness notification: one non-blocking read, then a parse
    /// attempt over everything buffered so far.
    ///
    /// # Errors
    ///
    /// Returns `SocketError` when the read fails with anything other than
    /// `WouldBlock` or `Interrupted`, or when the buffer can't grow.
    pub fn on_readable<R: NonBlockingRead>(&mut self, io: &R) -> Result<Assembly, SocketError> {
        self.buffer.reserve_read()?;

        match self.buffer.read_from(io) {
            Ok(0) => Ok(Assembly::Closed),
            Ok(read) => {
                trace!(read, buffered = self.buffer.len(), capacity = self.buffer.capacity(), "read request bytes");
                Ok(self.assemble())
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                trace!(kind = ?e.kind(), "nothing to read yet");
                Ok(Assembly::Incomplete)
            }
            Err(e) => {
                warn!(cause = %e, kind = ?e.kind(), "failed to read from http socket");
                Err(SocketError::read(e))
            }
        }
    }

    /// Appends already received bytes and attempts a parse.
    ///
    /// # Errors
    ///
    /// Returns `BufferError` when the buffer can't grow.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Assembly, BufferError> {
        if bytes.is_empty() {
            return Ok(Assembly::Incomplete);
        }
        self.buffer.extend_from_slice(bytes)?;
        Ok(self.assemble())
    }

    fn assemble(&mut self) -> Assembly {
        match self.decoder.decode(self.buffer.as_bytes_mut()) {
            Ok(None) => Assembly::Incomplete,
            Ok(Some(request)) => Assembly::Complete(request),
            Err(e) => Assembly::Malformed(e),
        }
    }

    pub fn release(&mut self) {
        self.buffer.release();
    }
}
