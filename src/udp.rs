//! UDP listener for QOTD requests.
//!
//! RFC 865 over UDP: any datagram is a request. The payload is ignored; the
//! only thing a request carries is the sender's address, which receives one
//! CRLF-terminated quote in a single reply datagram.
//!
//! Datagrams are handled one at a time inside a single loop. That is a
//! deliberate asymmetry with the TCP path: under load, requests queue at the
//! socket and are answered strictly in arrival order.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::ServerError;
use crate::server::ServerContext;

/// Read buffer for incoming datagrams, bounded at the RFC 865 message cap.
const RECV_BUFFER_SIZE: usize = 512;

/// UDP side of the QOTD server.
pub struct UdpServer {
    socket: UdpSocket,
    ctx: Arc<ServerContext>,
}

impl UdpServer {
    /// Bind the socket. A resolve/bind failure is fatal to the process.
    pub async fn bind(addr: &str, ctx: Arc<ServerContext>) -> Result<Self, ServerError> {
        let socket = UdpSocket::bind(addr).await.map_err(|e| ServerError::Bind {
            transport: "UDP",
            addr: addr.to_string(),
            source: e,
        })?;

        Ok(UdpServer { socket, ctx })
    }

    /// Address the socket actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive and answer datagrams sequentially until `shutdown` flips.
    ///
    /// Receive errors are logged and the loop continues; per-request failures
    /// never take the transport down.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), ServerError> {
        info!(addr = %self.local_addr()?, "UDP: QOTD server started");
        let mut buf = [0u8; RECV_BUFFER_SIZE];

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((_, peer)) => {
                        if let Err(e) = self.serve_datagram(peer).await {
                            error!(error = %e, client = %peer, "UDP handler failed");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read datagram");
                    }
                },
            }
        }

        info!("UDP listener stopped");
        Ok(())
    }

    /// Answer one request with one reply datagram.
    async fn serve_datagram(&self, peer: SocketAddr) -> Result<(), ServerError> {
        let request = Uuid::new_v4();
        info!(request = %request, client = %peer, "UDP request received");

        let (quote_id, response) = self.ctx.random_response()?;
        self.socket.send_to(&response, peer).await?;
        info!(request = %request, client = %peer, quote = quote_id, "UDP quote served");
        Ok(())
    }
}
