use bytes::BufMut;
use std::future::Future;
use std::io;
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;

/// A socket that reports read readiness and supports single non-blocking reads.
///
/// This is the part of the event loop a connection depends on: wait until the
/// loop reports the socket readable, then attempt exactly one read that may
/// fail with [`io::ErrorKind::WouldBlock`].
pub trait NonBlockingRead {
    /// Resolves when the loop reports the socket readable. Wakeups may be spurious.
    fn readable(&self) -> impl Future<Output = io::Result<()>>;

    /// Reads at most `buf.remaining_mut()` bytes without blocking.
    fn try_read_buf<B: BufMut>(&self, buf: &mut B) -> io::Result<usize>;
}

impl NonBlockingRead for TcpStream {
    fn readable(&self) -> impl Future<Output = io::Result<()>> {
        TcpStream::readable(self)
    }

    fn try_read_buf<B: BufMut>(&self, buf: &mut B) -> io::Result<usize> {
        TcpStream::try_read_buf(self, buf)
    }
}

#[cfg(unix)]
impl NonBlockingRead for UnixStream {
    fn readable(&self) -> impl Future<Output = io::Result<()>> {
        UnixStream::readable(self)
    }

    fn try_read_buf<B: BufMut>(&self, buf: &mut B) -> io::Result<usize> {
        UnixStream::try_read_buf(self, buf)
    }
}
