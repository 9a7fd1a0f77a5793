//! Error types for micro-webserver

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Anything that goes wrong inside a single connection is an
/// `io::Error` that the accept loop logs and drops instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The listening socket could not be opened
    #[error("could not bind listening socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Bind address that is not an IP literal
    #[error("invalid bind address: {0}")]
    InvalidAddress(String),
}
