use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::{debug, trace};

use crate::codec::ResponseEncoder;
use crate::connection::{Assembly, ConnectionConfig, NonBlockingRead, RequestAssembler};
use crate::handler::{Dispatcher, Store};
use crate::protocol::{HttpError, ResponseOutcome, SendError, SocketError};

/// What the event loop should do with a connection after a readiness notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep the connection registered and wait for more bytes.
    Suspend,
    /// Write the outcome, if any, then close the connection.
    Close(Option<ResponseOutcome>),
}

/// A one-shot HTTP connection: exactly one request, one response, then close.
///
/// The state machine is driven either by socket readiness through
/// [`on_readable`](Self::on_readable) or by bytes received elsewhere through
/// [`on_bytes`](Self::on_bytes). Once a terminal [`Step::Close`] has been
/// returned the buffer is released and every later call returns
/// `Step::Close(None)` without touching the store again.
#[derive(Debug)]
pub struct HttpConnection<S> {
    assembler: RequestAssembler,
    dispatcher: Dispatcher<S>,
    open: bool,
}

impl<S: Store> HttpConnection<S> {
    pub fn new(config: &ConnectionConfig, dispatcher: Dispatcher<S>) -> Self {
        Self { assembler: RequestAssembler::new(config), dispatcher, open: true }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn assembler(&self) -> &RequestAssembler {
        &self.assembler
    }

    /// Handles one readiness notification.
    ///
    /// # Errors
    ///
    /// Returns `SocketError` on a fatal read error; the connection is closed and its buffer released.
    pub fn on_readable<R: NonBlockingRead>(&mut self, io: &R) -> Result<Step, SocketError> {
        if !self.open {
            return Ok(Step::Close(None));
        }

        match self.assembler.on_readable(io) {
            Ok(assembly) => Ok(self.resolve(assembly)),
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }

    /// Handles bytes that were read by the caller.
    ///
    /// # Errors
    ///
    /// Returns `SocketError` when the buffer can't grow; the connection is closed.
    pub fn on_bytes(&mut self, bytes: &[u8]) -> Result<Step, SocketError> {
        if !self.open {
            return Ok(Step::Close(None));
        }

        match self.assembler.feed(bytes) {
            Ok(assembly) => Ok(self.resolve(assembly)),
            Err(e) => {
                self.close();
                Err(e.into())
            }
        }
    }

    fn resolve(&mut self, assembly: Assembly) -> Step {
        let outcome = match assembly {
            Assembly::Incomplete => return Step::Suspend,
            Assembly::Closed => {
                debug!("peer closed before sending a complete request");
                None
            }
            Assembly::Malformed(e) => {
                debug!(cause = %e, "http parse error");
                Some(ResponseOutcome::BadRequest)
            }
            Assembly::Complete(request) => Some(self.dispatcher.dispatch(&request)),
        };

        self.close();
        Step::Close(outcome)
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.assembler.release();
        }
    }

    /// Drives the connection until its single response has been written.
    ///
    /// The socket is dropped, and so closed, when this returns.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` when reading or writing the socket fails.
    pub async fn process<IO>(mut self, mut io: IO) -> Result<(), HttpError>
    where
        IO: NonBlockingRead + AsyncWrite + Unpin,
    {
        loop {
            io.readable().await.map_err(SocketError::read)?;

            match self.on_readable(&io)? {
                Step::Suspend => {}
                Step::Close(None) => return Ok(()),
                Step::Close(Some(outcome)) => {
                    send_response(&mut io, outcome).await?;
                    return Ok(());
                }
            }
        }
    }
}

/// Writes the whole response, then shuts down the write half.
async fn send_response<W>(writer: &mut W, outcome: ResponseOutcome) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    let status = outcome.status();
    let mut buf = BytesMut::new();
    ResponseEncoder::new().encode(outcome, &mut buf)?;

    writer.write_all(&buf).await?;
    writer.shutdown().await?;
    trace!(status = %status, size = buf.len(), "sent response");
    Ok(())
}
