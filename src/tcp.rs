//! TCP listener for QOTD requests.
//!
//! RFC 865 over TCP: a client connects, the server writes exactly one
//! CRLF-terminated quote and closes the connection. Nothing is read from the
//! client. Each accepted connection is served on its own task, so a slow
//! client only ever stalls its own handler.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::server::ServerContext;

/// TCP side of the QOTD server.
pub struct TcpServer {
    listener: TcpListener,
    ctx: Arc<ServerContext>,
}

impl TcpServer {
    /// Bind the listener. A bind failure is fatal to the process.
    pub async fn bind(addr: &str, ctx: Arc<ServerContext>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind {
                transport: "TCP",
                addr: addr.to_string(),
                source: e,
            })?;

        Ok(TcpServer { listener, ctx })
    }

    /// Address the listener actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` flips.
    ///
    /// Accept errors are logged and the loop keeps going; there is no bound
    /// on the number of in-flight handler tasks.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), ServerError> {
        info!(addr = %self.local_addr()?, "TCP: QOTD server started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let ctx = Arc::clone(&self.ctx);
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(stream, peer, ctx).await {
                                warn!(error = %e, client = %peer, "TCP handler failed");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }

        info!("TCP listener stopped");
        Ok(())
    }
}

/// Serve one connection: write a single quote, then close.
async fn serve_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    ctx: Arc<ServerContext>,
) -> Result<(), ServerError> {
    let request = Uuid::new_v4();
    info!(request = %request, client = %peer, "TCP request received");

    let (quote_id, response) = ctx.random_response()?;
    stream.write_all(&response).await?;
    stream.shutdown().await?;
    info!(request = %request, client = %peer, quote = quote_id, "TCP quote served");

    drop(stream);
    info!(request = %request, client = %peer, "Connection closed");
    Ok(())
}
