use std::net::SocketAddr;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use micro_kv_http::connection::{DEFAULT_MAX_HEADERS, DEFAULT_MAX_REQUEST_SIZE, DEFAULT_READ_CHUNK};
use micro_kv_http::handler::{EmptyPathPolicy, Store};
use tracing::Level;

use crate::error::ServerError;
use crate::server::{DEFAULT_MAX_ACCEPTS_PER_CALL, Server, ServerBuilder};
use crate::store::MemoryStore;

/// Serve the scalar values of an in-memory key-value store over http.
#[derive(Debug, Parser)]
#[command(name = "micro-kv", version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "MICRO_KV_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// JSON object loaded into the store at start-up
    #[arg(long, env = "MICRO_KV_SEED")]
    pub seed: Option<PathBuf>,

    /// Bytes added to a connection buffer each time it grows
    #[arg(long, env = "MICRO_KV_READ_CHUNK", default_value_t = DEFAULT_READ_CHUNK)]
    pub read_chunk: usize,

    /// Largest request head accepted before answering 400
    #[arg(long, env = "MICRO_KV_MAX_REQUEST_SIZE", default_value_t = DEFAULT_MAX_REQUEST_SIZE)]
    pub max_request_size: usize,

    /// Largest number of request headers accepted before answering 400
    #[arg(long, env = "MICRO_KV_MAX_HEADERS", default_value_t = DEFAULT_MAX_HEADERS)]
    pub max_headers: usize,

    /// Connections accepted per listener wakeup
    #[arg(long, env = "MICRO_KV_MAX_ACCEPTS", default_value_t = DEFAULT_MAX_ACCEPTS_PER_CALL)]
    pub max_accepts: usize,

    /// Live connections allowed at once, unlimited when unset
    #[arg(long, env = "MICRO_KV_MAX_CONNECTIONS")]
    pub max_connections: Option<usize>,

    /// Answer `/` with 400 instead of looking up the key `/`
    #[arg(long, env = "MICRO_KV_REJECT_EMPTY_PATH")]
    pub reject_empty_path: bool,

    #[arg(long, env = "MICRO_KV_LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Cli {
    pub fn empty_path(&self) -> EmptyPathPolicy {
        if self.reject_empty_path { EmptyPathPolicy::Reject } else { EmptyPathPolicy::RootKey }
    }

    pub fn server_builder<S: Store + 'static>(&self, store: Rc<S>) -> ServerBuilder<S> {
        Server::builder()
            .store(store)
            .address(self.listen)
            .read_chunk(self.read_chunk)
            .max_request_size(self.max_request_size)
            .max_headers(self.max_headers)
            .max_accepts_per_call(self.max_accepts)
            .max_connections(self.max_connections)
            .empty_path(self.empty_path())
    }

    /// Loads the seed file, or returns an empty store when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` when the file can not be read or is not a json object.
    pub fn load_store(&self) -> Result<MemoryStore, ServerError> {
        let Some(path) = &self.seed else {
            return Ok(MemoryStore::new());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ServerError::SeedFile { path: path.clone(), source })?;
        MemoryStore::from_json(&text).map_err(|source| ServerError::Seed { path: path.clone(), source })
    }
}
