//! Growable per-connection read buffer.
//!
//! The buffer grows in fixed increments: before every read it makes sure at
//! least one increment of spare capacity is available, growing by exactly one
//! increment when it is not. One byte of the spare region is always kept back
//! for a terminator written after the logical end, so `capacity >= len + 1`
//! holds after every growth step and every read.

use bytes::{BufMut, BytesMut};
use std::io;

use crate::connection::{MIN_READ_CHUNK, NonBlockingRead};
use crate::protocol::BufferError;

/// Largest capacity a buffer may grow to
const MAX_CAPACITY: usize = isize::MAX.unsigned_abs();

#[derive(Debug)]
pub struct ConnectionBuffer {
    buf: BytesMut,
    capacity: usize,
    increment: usize,
}

impl ConnectionBuffer {
    /// Creates an empty buffer, nothing is allocated until the first read.
    ///
    /// `increment` is raised to [`MIN_READ_CHUNK`] when smaller.
    pub fn new(increment: usize) -> Self {
        Self { buf: BytesMut::new(), capacity: 0, increment: increment.max(MIN_READ_CHUNK) }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Capacity accounted in whole growth increments.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn spare(&self) -> usize {
        self.capacity - self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Grows by one increment when less than one increment is spare, and returns
    /// how many bytes the next read may take.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::CapacityOverflow` when the grown capacity can't be represented.
    pub fn reserve_read(&mut self) -> Result<usize, BufferError> {
        if self.spare() < self.increment {
            self.grow()?;
        }
        Ok(self.spare() - 1)
    }

    fn grow(&mut self) -> Result<(), BufferError> {
        let capacity = self
            .capacity
            .checked_add(self.increment)
            .filter(|capacity| *capacity <= MAX_CAPACITY)
            .ok_or_else(|| BufferError::capacity_overflow(self.capacity, self.increment))?;

        self.buf.reserve(capacity - self.buf.len());
        self.capacity = capacity;
        Ok(())
    }

    /// Performs exactly one non-blocking read into the spare region, minus the terminator byte.
    ///
    /// [`reserve_read`](Self::reserve_read) must have been called before.
    ///
    /// # Errors
    ///
    /// Returns whatever the read returned, including `WouldBlock`.
    pub fn read_from<R: NonBlockingRead>(&mut self, io: &R) -> io::Result<usize> {
        let window = self.spare().saturating_sub(1);
        let read = io.try_read_buf(&mut (&mut self.buf).limit(window))?;
        if read > 0 {
            self.terminate();
        }
        Ok(read)
    }

    /// Appends `bytes` with the same growth and terminator rules as socket reads.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::CapacityOverflow` when the buffer can't grow any more.
    pub fn extend_from_slice(&mut self, mut bytes: &[u8]) -> Result<(), BufferError> {
        while !bytes.is_empty() {
            let window = self.reserve_read()?;
            let (chunk, rest) = bytes.split_at(window.min(bytes.len()));
            self.buf.put_slice(chunk);
            self.terminate();
            bytes = rest;
        }
        Ok(())
    }

    /// Writes a zero byte right after the logical end; it never becomes part of the content.
    fn terminate(&mut self) {
        if let Some(terminator) = self.buf.spare_capacity_mut().first_mut() {
            terminator.write(0);
        }
    }

    /// Drops the content and the allocation.
    pub fn release(&mut self) {
        self.buf = BytesMut::new();
        self.capacity = 0;
    }
}
