//! QOTD server binary.
//!
//! Startup order matters: configuration is resolved and validated first,
//! logging second, then the quote store is loaded, the advertisement is
//! started, and finally the listeners. Shutdown runs the same path in
//! reverse, driven by Ctrl-C through a watch channel, so the advertisement
//! teardown is reachable in normal operation.

use std::process;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use qotd::advertise;
use qotd::config::Config;
use qotd::error::ServerError;
use qotd::quotes::QuoteStore;
use qotd::select::Selector;
use qotd::server::ServerContext;
use qotd::tcp::TcpServer;
use qotd::udp::UdpServer;

#[tokio::main]
async fn main() {
    // Config errors surface before logging is up.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("qotd: {e}");
            process::exit(1);
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(config).await {
        error!(error = %e, "Fatal error");
        process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), ServerError> {
    info!(
        source = %config.source,
        port = config.port,
        strict = config.strict_mode,
        tcp = config.tcp_enabled,
        udp = config.udp_enabled,
        "Starting QOTD server"
    );

    let store = QuoteStore::load(&config.source).await?;
    info!(quotes = store.len(), "Quote store loaded");

    let ctx = Arc::new(ServerContext::new(store, Selector::new(), config.strict_mode));

    let advertisement = if config.advertise_enabled {
        Some(advertise::start(&config)?)
    } else {
        None
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let addr = format!("0.0.0.0:{}", config.port);
    let mut listeners: Vec<(&str, JoinHandle<Result<(), ServerError>>)> = Vec::new();

    if config.udp_enabled {
        let server = UdpServer::bind(&addr, Arc::clone(&ctx)).await?;
        listeners.push(("UDP", tokio::spawn(server.run(shutdown_rx.clone()))));
    }

    if config.tcp_enabled {
        let server = TcpServer::bind(&addr, Arc::clone(&ctx)).await?;
        listeners.push(("TCP", tokio::spawn(server.run(shutdown_rx.clone()))));
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Wake the listener loops, then wait for them to drain.
    let _ = shutdown_tx.send(true);
    for (transport, handle) in listeners {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, transport, "Listener exited with error"),
            Err(e) => error!(error = %e, transport, "Listener task panicked"),
        }
    }

    if let Some(advertisement) = advertisement {
        advertisement.stop()?;
        info!("Service advertisement stopped");
    }

    Ok(())
}
