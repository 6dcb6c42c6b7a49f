//! Crate-wide error type.
//!
//! Everything here is either fatal at startup (load, bind, configuration) or
//! logged by the listener loops; no error is silently discarded.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the QOTD server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Reading the quote file from disk failed.
    #[error("failed to read quote file '{path}': {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fetching the quote source over HTTP failed.
    #[error("failed to fetch quote source '{url}': {source}")]
    SourceFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The quote source parsed to no quotes at all.
    #[error("quote source '{0}' contains no quotes")]
    EmptySource(String),

    /// Selection was attempted against an empty store.
    #[error("quote store is empty, cannot select a quote")]
    EmptyStore,

    /// Binding a listener socket failed.
    #[error("failed to bind {transport} listener on {addr}: {source}")]
    Bind {
        transport: &'static str,
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Registering or tearing down the mDNS advertisement failed.
    #[error("service advertisement failed: {0}")]
    Advertise(#[from] mdns_sd::Error),

    /// Socket or signal I/O outside the bind path.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
