//! Local-network service advertisement.
//!
//! Announces the running server as a `_qotd._tcp` service over mDNS. The
//! protocol engine only sees the small [`Advertisement`] capability: start it
//! before the listeners, stop it on shutdown. Swapping the discovery
//! mechanism means swapping the implementation behind `start`, nothing else.

use mdns_sd::{ServiceDaemon, ServiceInfo};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ServerError;

/// mDNS service type for Quote of the Day servers.
pub const SERVICE_TYPE: &str = "_qotd._tcp.local.";

/// Port published in the mDNS record.
///
/// This is a fixed literal, not the configured serving port — a
/// long-standing quirk of this server that is preserved deliberately. A
/// warning is logged whenever it disagrees with the port actually served on.
pub const ADVERTISED_PORT: u16 = 3333;

/// Static human-readable description carried in the TXT record.
const TXT_DESCRIPTION: &str = "Quote of the Day server";

/// A running advertisement; drop-in replaceable by other discovery backends.
pub trait Advertisement: Send {
    /// Withdraw the advertisement and release the backend.
    fn stop(self: Box<Self>) -> Result<(), ServerError>;
}

/// Announce the server on the local network.
///
/// The instance name is the machine's reported hostname; the advertised port
/// is [`ADVERTISED_PORT`] regardless of configuration.
pub fn start(config: &Config) -> Result<Box<dyn Advertisement>, ServerError> {
    if config.port != ADVERTISED_PORT {
        warn!(
            advertised = ADVERTISED_PORT,
            serving = config.port,
            "mDNS record advertises a fixed port that does not match the serving port"
        );
    }

    let host = hostname::get()?.to_string_lossy().into_owned();
    let daemon = ServiceDaemon::new()?;
    let service = ServiceInfo::new(
        SERVICE_TYPE,
        &host,
        &format!("{host}.local."),
        "",
        ADVERTISED_PORT,
        &[("description", TXT_DESCRIPTION)][..],
    )?
    .enable_addr_auto();

    let fullname = service.get_fullname().to_string();
    daemon.register(service)?;
    info!(instance = %host, service = SERVICE_TYPE, port = ADVERTISED_PORT, "Service advertised");

    Ok(Box::new(MdnsAdvertisement { daemon, fullname }))
}

struct MdnsAdvertisement {
    daemon: ServiceDaemon,
    fullname: String,
}

impl Advertisement for MdnsAdvertisement {
    fn stop(self: Box<Self>) -> Result<(), ServerError> {
        // Both calls hand back status channels; nothing waits on them during
        // process teardown.
        let _ = self.daemon.unregister(&self.fullname)?;
        let _ = self.daemon.shutdown()?;
        Ok(())
    }
}
