//! qotd: an RFC 865 Quote of the Day server.
//!
//! Serves one random quote per request over TCP and UDP:
//! - TCP: the client connects, receives one CRLF-terminated quote, and the
//!   connection is closed. Connections are handled concurrently.
//! - UDP: any datagram is a request; one reply datagram goes back to the
//!   sender. Datagrams are handled sequentially, in arrival order.
//!
//! Quotes come from a local file or an http(s) URL, separated by lines
//! holding only `%`. Strict mode pins the port to 17 and keeps every
//! response below 512 bytes. The running server can announce itself over
//! mDNS as `_qotd._tcp`.

pub mod advertise;
pub mod config;
pub mod error;
pub mod protocol;
pub mod quotes;
pub mod select;
pub mod server;
pub mod tcp;
pub mod udp;

pub use config::Config;
pub use error::ServerError;
pub use quotes::QuoteStore;
pub use select::Selector;
pub use server::ServerContext;
pub use tcp::TcpServer;
pub use udp::UdpServer;
