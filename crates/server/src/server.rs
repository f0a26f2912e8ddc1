use std::io;
use std::net::SocketAddr;
use std::rc::Rc;

use futures::FutureExt;
use micro_kv_http::connection::{
    ConnectionConfig, DEFAULT_MAX_HEADERS, DEFAULT_MAX_REQUEST_SIZE, DEFAULT_READ_CHUNK, HttpConnection, MIN_READ_CHUNK,
};
use micro_kv_http::handler::{Dispatcher, EmptyPathPolicy, Store};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::LocalSet;
use tracing::{debug, info, warn};

use crate::error::{RegisterError, ServerBuildError, ServerError};
use crate::registry::ConnectionRegistry;

/// Default bound on the connections accepted per listener wakeup.
pub const DEFAULT_MAX_ACCEPTS_PER_CALL: usize = 1000;

/// Upper bound for `max_headers`; the header array is allocated on every parse attempt.
pub const MAX_HEADERS_LIMIT: usize = 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    address: SocketAddr,
    connection: ConnectionConfig,
    max_accepts_per_call: usize,
    max_connections: Option<usize>,
    empty_path: EmptyPathPolicy,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    pub fn max_accepts_per_call(&self) -> usize {
        self.max_accepts_per_call
    }

    pub fn max_connections(&self) -> Option<usize> {
        self.max_connections
    }

    pub fn empty_path(&self) -> EmptyPathPolicy {
        self.empty_path
    }
}

#[derive(Debug)]
pub struct ServerBuilder<S> {
    store: Option<Rc<S>>,
    address: Option<SocketAddr>,
    read_chunk: usize,
    max_request_size: usize,
    max_headers: usize,
    max_accepts_per_call: usize,
    max_connections: Option<usize>,
    empty_path: EmptyPathPolicy,
}

impl<S: Store> ServerBuilder<S> {
    fn new() -> Self {
        Self {
            store: None,
            address: None,
            read_chunk: DEFAULT_READ_CHUNK,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            max_headers: DEFAULT_MAX_HEADERS,
            max_accepts_per_call: DEFAULT_MAX_ACCEPTS_PER_CALL,
            max_connections: None,
            empty_path: EmptyPathPolicy::default(),
        }
    }

    pub fn store(mut self, store: Rc<S>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    pub fn read_chunk(mut self, read_chunk: usize) -> Self {
        self.read_chunk = read_chunk;
        self
    }

    pub fn max_request_size(mut self, max_request_size: usize) -> Self {
        self.max_request_size = max_request_size;
        self
    }

    pub fn max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    pub fn max_accepts_per_call(mut self, max_accepts_per_call: usize) -> Self {
        self.max_accepts_per_call = max_accepts_per_call;
        self
    }

    pub fn max_connections(mut self, max_connections: Option<usize>) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn empty_path(mut self, empty_path: EmptyPathPolicy) -> Self {
        self.empty_path = empty_path;
        self
    }

    /// # Errors
    ///
    /// Returns `ServerBuildError` when the store or address is missing, or a limit is unusable.
    pub fn build(self) -> Result<Server<S>, ServerBuildError> {
        let store = self.store.ok_or(ServerBuildError::MissingStore)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        if self.read_chunk < MIN_READ_CHUNK {
            return Err(ServerBuildError::InvalidReadChunk { read_chunk: self.read_chunk, min: MIN_READ_CHUNK });
        }
        if self.max_accepts_per_call == 0 {
            return Err(ServerBuildError::InvalidAcceptBurst);
        }
        if !(1..=MAX_HEADERS_LIMIT).contains(&self.max_headers) {
            return Err(ServerBuildError::InvalidMaxHeaders { max_headers: self.max_headers, max: MAX_HEADERS_LIMIT });
        }

        let config = ServerConfig {
            address,
            connection: ConnectionConfig::new(self.read_chunk, self.max_request_size, self.max_headers),
            max_accepts_per_call: self.max_accepts_per_call,
            max_connections: self.max_connections,
            empty_path: self.empty_path,
        };
        let dispatcher = Dispatcher::new(store).with_empty_path(self.empty_path);
        let registry = ConnectionRegistry::new(self.max_connections);
        Ok(Server { config, dispatcher, registry })
    }
}

/// Single-threaded http server: one listener, one task per connection, all on a `LocalSet`.
#[derive(Debug)]
pub struct Server<S> {
    config: ServerConfig,
    dispatcher: Dispatcher<S>,
    registry: ConnectionRegistry,
}

impl<S: Store + 'static> Server<S> {
    pub fn builder() -> ServerBuilder<S> {
        ServerBuilder::new()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Runs the server on a current-thread runtime until it fails or ctrl-c is received.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` when the runtime can not be built, binding fails or the signal handler fails.
    pub fn start(self) -> Result<(), ServerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ServerError::Runtime { source })?;
        let local = LocalSet::new();

        local.block_on(&runtime, async move {
            tokio::select! {
                result = self.run() => result,
                signal = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    signal.map_err(|source| ServerError::Signal { source })
                }
            }
        })
    }

    /// Binds the configured address and serves it. Must be polled inside a `LocalSet`.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` when the address can not be bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let address = self.config.address;
        let listener = TcpListener::bind(address).await.map_err(|e| ServerError::bind(address, e))?;
        info!(address = %address, "start listening");
        self.serve(listener).await;
        Ok(())
    }

    /// Accepts connections from `listener` forever. Must be polled inside a `LocalSet`.
    pub async fn serve(self, listener: TcpListener) {
        loop {
            let accepted = listener.accept().await;
            self.accept_burst(&listener, accepted);
            tokio::task::yield_now().await;
        }
    }

    /// Registers `first` and then every connection that is already pending, up to the burst limit.
    fn accept_burst(&self, listener: &TcpListener, first: io::Result<(TcpStream, SocketAddr)>) {
        let mut remaining = self.config.max_accepts_per_call;
        let mut next = Some(first);

        while let Some(accepted) = next.take() {
            let (stream, peer) = match accepted {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    return;
                }
            };
            debug!(peer = %peer, "http accepted");

            if let Err(e) = self.register(stream, peer) {
                warn!(peer = %peer, cause = %e, "failed to register connection, closing it");
                return;
            }

            remaining -= 1;
            if remaining == 0 {
                return;
            }
            // a pending accept means nothing else is queued
            next = listener.accept().now_or_never();
        }
    }

    /// Takes a registry slot and spawns the connection task. The stream is closed on failure.
    fn register(&self, stream: TcpStream, peer: SocketAddr) -> Result<(), RegisterError> {
        let slot = self.registry.register()?;
        let connection = HttpConnection::new(self.config.connection(), self.dispatcher.clone());

        tokio::task::spawn_local(async move {
            let _slot = slot;
            match connection.process(stream).await {
                Ok(()) => debug!(peer = %peer, "finished process, connection shutdown"),
                Err(e) => warn!(peer = %peer, cause = %e, "connection failed, connection shutdown"),
            }
        });
        Ok(())
    }
}
