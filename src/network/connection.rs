//! Connection Handler
//!
//! Drives one accepted connection through its single transaction: read one
//! request frame, run the transfer engine, write one response or error
//! frame, close.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::engine::TransferEngine;
use crate::error::{LinkError, Result};
use crate::protocol::{read_request, write_error, write_response, ResponseFrame};

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the transfer engine
    engine: Arc<TransferEngine>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and applies the configured timeouts.
    pub fn new(stream: TcpStream, engine: Arc<TransferEngine>, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            engine,
            peer_addr,
        })
    }

    /// Handle the connection's one transaction (blocking)
    ///
    /// Every framing or codec failure is converted into an error frame; the
    /// connection is closed when this returns, success or failure.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("connection established from {}", self.peer_addr);

        let request = match read_request(&mut self.reader) {
            Ok(request) => request,
            Err(LinkError::ConnectionClosed) => {
                tracing::debug!("client {} disconnected before sending a frame", self.peer_addr);
                return Ok(());
            }
            Err(LinkError::Io(ref e)) if is_disconnect(e.kind()) => {
                tracing::debug!("connection lost to {}: {}", self.peer_addr, e);
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("bad request from {}: {}", self.peer_addr, e);
                let _ = write_error(&mut self.writer, &e.to_string());
                return Err(e);
            }
        };

        tracing::debug!(
            method = %request.method,
            payload = request.payload.len(),
            "request frame received from {}",
            self.peer_addr
        );

        match self.engine.process(request.method, &request.payload) {
            Ok(outcome) => {
                let frame = ResponseFrame::new(outcome.stats, outcome.recompressed);
                self.send(|w| write_response(w, &frame))?;
                tracing::debug!("response frame sent to {}", self.peer_addr);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("transaction failed for {}: {}", self.peer_addr, e);
                self.send(|w| write_error(w, &e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Write a frame, downgrading a mid-write disconnect to a debug log
    fn send<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<TcpStream>) -> Result<()>,
    {
        if let Err(e) = write(&mut self.writer) {
            if let LinkError::Io(ref io_err) = e {
                if is_disconnect(io_err.kind()) {
                    tracing::debug!(
                        "client {} disconnected before the frame could be sent: {}",
                        self.peer_addr,
                        e
                    );
                    return Ok(());
                }
            }
            tracing::warn!("error writing to {}: {}", self.peer_addr, e);
            return Err(e);
        }
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
    )
}
