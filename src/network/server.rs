//! TCP Server
//!
//! The responder role: accepts connections and hands each one to a worker
//! thread for its single transaction.

use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::engine::TransferEngine;
use crate::error::Result;

use super::Connection;

/// How often the accept loop re-checks the shutdown flag
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// TCP server for the responder role
pub struct Server {
    config: Config,
    engine: Arc<TransferEngine>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
}

impl Server {
    /// Bind the listen address from the config
    pub fn bind(config: Config, engine: Arc<TransferEngine>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        // Non-blocking accept so the loop can observe the shutdown flag
        listener.set_nonblocking(true)?;

        Ok(Self {
            config,
            engine,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// The address actually bound (useful when the config named port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// A handle that makes `run` return when set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Accept connections until shutdown (blocking)
    ///
    /// Each accepted connection runs its one transaction on its own thread;
    /// connections beyond `max_connections` are dropped immediately.
    pub fn run(&self) -> Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::info!("shutdown requested, stopping accept loop");
                return Ok(());
            }

            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("accept failed: {}", e);
                    continue;
                }
            };

            if self.active.load(Ordering::Relaxed) >= self.config.max_connections {
                tracing::warn!("connection limit reached, refusing {}", peer);
                drop(stream);
                continue;
            }

            // Worker sockets block normally; only the acceptor polls
            if let Err(e) = stream.set_nonblocking(false) {
                tracing::warn!("failed to configure socket for {}: {}", peer, e);
                continue;
            }

            let engine = Arc::clone(&self.engine);
            let config = self.config.clone();
            let active = Arc::clone(&self.active);

            active.fetch_add(1, Ordering::Relaxed);
            thread::spawn(move || {
                match Connection::new(stream, engine, &config) {
                    Ok(mut connection) => {
                        if let Err(e) = connection.handle() {
                            tracing::warn!("connection from {} ended with error: {}", peer, e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to set up connection from {}: {}", peer, e);
                    }
                }
                active.fetch_sub(1, Ordering::Relaxed);
            });
        }
    }
}
