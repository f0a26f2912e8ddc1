//! A single-threaded http server exposing the scalar values of an in-memory key-value store.
//!
//! Every connection carries exactly one request: the path (less its leading `/`) is
//! looked up in the store and the value, if it is a scalar, is written back as a
//! `text/plain` HTTP/1.0 response before the connection is closed.
//!
//! ```no_run
//! use std::rc::Rc;
//! use micro_kv_server::{MemoryStore, Server};
//!
//! let mut store = MemoryStore::new();
//! store.set("greeting", "Hello World!");
//!
//! let server = Server::builder()
//!     .store(Rc::new(store))
//!     .address("127.0.0.1:8080".parse().unwrap())
//!     .build()
//!     .unwrap();
//! server.start().unwrap();
//! ```

mod cli;
mod error;
mod registry;
mod server;
mod store;

pub use cli::Cli;
pub use error::RegisterError;
pub use error::ServerBuildError;
pub use error::ServerError;
pub use registry::ConnectionRegistry;
pub use registry::ConnectionSlot;
pub use server::DEFAULT_MAX_ACCEPTS_PER_CALL;
pub use server::MAX_HEADERS_LIMIT;
pub use server::Server;
pub use server::ServerBuilder;
pub use server::ServerConfig;
pub use store::MemoryStore;
pub use store::SeedError;
pub use store::Value;
