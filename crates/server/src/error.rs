use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

use crate::store::SeedError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind server at {address} error: {source}")]
    Bind { address: SocketAddr, source: io::Error },

    #[error("build runtime error: {source}")]
    Runtime { source: io::Error },

    #[error("listen for shutdown signal error: {source}")]
    Signal { source: io::Error },

    #[error("read seed file {path:?} error: {source}")]
    SeedFile { path: PathBuf, source: io::Error },

    #[error("load seed file {path:?} error: {source}")]
    Seed { path: PathBuf, source: SeedError },

    #[error("setting default subscriber failed: {source}")]
    Logging {
        #[from]
        source: SetGlobalDefaultError,
    },

    #[error(transparent)]
    Build(#[from] ServerBuildError),
}

impl ServerError {
    pub fn bind(address: SocketAddr, source: io::Error) -> Self {
        Self::Bind { address, source }
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("store must be set")]
    MissingStore,
    #[error("address must be set")]
    MissingAddress,
    #[error("read chunk {read_chunk} is smaller than {min}")]
    InvalidReadChunk { read_chunk: usize, min: usize },
    #[error("accept burst must allow at least one connection")]
    InvalidAcceptBurst,
    #[error("max headers {max_headers} is outside 1..={max}")]
    InvalidMaxHeaders { max_headers: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("connection limit {limit} reached")]
    Full { limit: usize },
}
