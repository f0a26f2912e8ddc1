//! Request dispatch against the key-value store.
//!
//! - [`Store`]: the read-only lookup seam, implemented by the store backend
//! - [`Dispatcher`]: turns a [`ParsedRequest`](crate::protocol::ParsedRequest)
//!   into a [`ResponseOutcome`](crate::protocol::ResponseOutcome) with one lookup

mod dispatcher;
mod store;

pub use dispatcher::Dispatcher;
pub use dispatcher::EmptyPathPolicy;
pub use dispatcher::ROOT_KEY;
#[cfg(test)]
pub(crate) use store::MockStore;
pub use store::Lookup;
pub use store::Store;
pub use store::StoredValue;
