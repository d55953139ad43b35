use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Fatal server lifecycle failures. Request-level failures are mapped to
/// HTTP responses by the handlers instead.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("agent0-wrapper could not bind its listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("agent0-wrapper stopped serving: {0}")]
    Serve(#[from] io::Error),
}
