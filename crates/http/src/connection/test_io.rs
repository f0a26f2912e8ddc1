use bytes::BufMut;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::{Future, ready};
use std::io;

use crate::connection::NonBlockingRead;

/// Replays a script of read results; an exhausted script reads as `WouldBlock`.
#[derive(Debug, Default)]
pub(crate) struct ScriptedReader {
    reads: RefCell<VecDeque<io::Result<Vec<u8>>>>,
    calls: Cell<usize>,
}

impl ScriptedReader {
    pub(crate) fn new<I: IntoIterator<Item = io::Result<Vec<u8>>>>(reads: I) -> Self {
        Self { reads: RefCell::new(reads.into_iter().collect()), calls: Cell::new(0) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl NonBlockingRead for ScriptedReader {
    fn readable(&self) -> impl Future<Output = io::Result<()>> {
        ready(Ok(()))
    }

    fn try_read_buf<B: BufMut>(&self, buf: &mut B) -> io::Result<usize> {
        self.calls.set(self.calls.get() + 1);
        let mut reads = self.reads.borrow_mut();
        match reads.pop_front() {
            None => Err(io::ErrorKind::WouldBlock.into()),
            Some(Err(e)) => Err(e),
            Some(Ok(mut bytes)) => {
                let read = bytes.len().min(buf.remaining_mut());
                let rest = bytes.split_off(read);
                buf.put_slice(&bytes);
                if !rest.is_empty() {
                    reads.push_front(Ok(rest));
                }
                Ok(read)
            }
        }
    }
}
