use std::fmt;
use std::net::SocketAddr;

use tokio::io::{self, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, info, trace, warn};

use crate::config::ListenerConfig;
use crate::error::{Error, Result};
use crate::request::{self, RequestHead, RequestLineShape};
use crate::response;
use crate::shutdown::Shutdown;

/// Lifecycle of a single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Accepted,
    ReadingHeaders,
    WritingResponse,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accepted => "accepted",
            Self::ReadingHeaders => "reading-headers",
            Self::WritingResponse => "writing-response",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    pub async fn bind(config: &ListenerConfig) -> Result<Self> {
        let addr = config.socket_addr();
        let bind_error = |source| Error::Bind { addr, source };

        let inner = TcpListener::bind(addr).await.map_err(bind_error)?;
        let local_addr = inner.local_addr().map_err(bind_error)?;
        info!("Micro-webserver listening on {}", local_addr);

        Ok(Self { inner, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves clients one at a time until `shutdown` fires.
    ///
    /// A connection is handled to completion before the next `accept`, so a
    /// client that never finishes its headers holds up everyone behind it.
    /// Errors on a single connection are logged and the loop moves on.
    pub async fn run(self, mut shutdown: Shutdown) {
        info!("Waiting for connection");

        while !shutdown.is_triggered() {
            let accepted = tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                accepted = self.inner.accept() => accepted,
            };

            let (stream, peer) = match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Could not accept connection");
                    continue;
                }
            };

            info!(%peer, "Connection established");

            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!(%peer, "Shutdown requested, dropping connection");
                    break;
                }
                result = handle_connection(stream, peer) => {
                    if let Err(e) = result {
                        warn!(%peer, error = %e, "Could not serve remote request");
                    }
                }
            }
        }

        info!("Accept loop stopped");
    }
}

/// Reads the request head, sends the fixed response and closes.
///
/// The stream is owned here so it is released on every path out, errors
/// included. An empty request still gets the response.
pub async fn handle_connection<S>(mut stream: S, peer: SocketAddr) -> io::Result<RequestHead>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    trace!(%peer, state = %ConnectionState::Accepted);

    trace!(%peer, state = %ConnectionState::ReadingHeaders);
    let head = {
        let mut reader = BufReader::new(&mut stream);
        request::read_head(&mut reader).await?
    };
    log_request_line(&head, peer);

    trace!(%peer, state = %ConnectionState::WritingResponse);
    debug!(%peer, "Sending response headers and resource");
    response::write_fixed_response(&mut stream).await?;
    stream.shutdown().await?;

    trace!(%peer, state = %ConnectionState::Closed);
    Ok(head)
}

fn log_request_line(head: &RequestHead, peer: SocketAddr) {
    if head.is_empty() {
        info!(%peer, "Request is empty");
    } else if let Some(line) = head.request_line.as_deref() {
        match RequestLineShape::of(line) {
            RequestLineShape::WellFormed => {
                info!(%peer, request = line, headers = head.header_lines, "Well-formed request received");
            }
            RequestLineShape::Malformed => {
                info!(
                    %peer,
                    request = line,
                    headers = head.header_lines,
                    "Request does not start with \"GET\" and end with \"HTTP/1.1\""
                );
            }
        }
    }

    if !head.terminated {
        debug!(%peer, "Stream ended before a blank line");
    }
}
