use std::cell::Cell;
use std::rc::Rc;

use crate::error::RegisterError;

/// Counts live connections and refuses new ones past an optional limit.
#[derive(Debug, Clone)]
pub struct ConnectionRegistry {
    live: Rc<Cell<usize>>,
    limit: Option<usize>,
}

/// Held by a connection task for as long as the connection is registered.
#[derive(Debug)]
pub struct ConnectionSlot {
    live: Rc<Cell<usize>>,
}

impl ConnectionRegistry {
    pub fn new(limit: Option<usize>) -> Self {
        Self { live: Rc::new(Cell::new(0)), limit }
    }

    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// # Errors
    ///
    /// Returns `RegisterError::Full` when the limit has been reached.
    pub fn register(&self) -> Result<ConnectionSlot, RegisterError> {
        if let Some(limit) = self.limit
            && self.live.get() >= limit
        {
            return Err(RegisterError::Full { limit });
        }

        self.live.set(self.live.get() + 1);
        Ok(ConnectionSlot { live: Rc::clone(&self.live) })
    }
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
