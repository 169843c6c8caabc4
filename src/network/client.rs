//! TCP Client
//!
//! The sender role: open a connection, transmit one request frame, await
//! exactly one response (or error) frame, close.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::codec::Method;
use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::protocol::{read_reply, write_request, RequestFrame, ResponseFrame};

/// Sender endpoint for one-shot transfer transactions
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
    config: Config,
}

impl Client {
    /// Create a client that will connect to `addr`
    pub fn new(addr: impl Into<String>, config: Config) -> Self {
        Self {
            addr: addr.into(),
            config,
        }
    }

    /// Run one transfer transaction.
    ///
    /// Whether `payload` was pre-compressed locally is the caller's choice;
    /// the protocol is agnostic to who compresses first. Every read is
    /// bounded by the configured timeout; exceeding it surfaces as
    /// [`LinkError::Timeout`] and aborts the transaction without retry.
    pub fn transfer(&self, method: Method, payload: &[u8]) -> Result<ResponseFrame> {
        let stream = self.connect()?;
        tracing::debug!(
            %method,
            payload = payload.len(),
            "connected to {}, sending request frame",
            self.addr
        );

        let mut writer = BufWriter::new(stream.try_clone()?);
        let frame = RequestFrame::new(method, payload.to_vec());
        write_request(&mut writer, &frame)?;

        let mut reader = BufReader::new(stream);
        let response = read_reply(&mut reader, self.config.chunk_size)?;
        tracing::debug!(
            recompressed = response.payload.len(),
            "response frame received from {}",
            self.addr
        );

        Ok(response)
    }

    fn connect(&self) -> Result<TcpStream> {
        let addr = self
            .addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| LinkError::Config(format!("unresolvable address: {}", self.addr)))?;

        let stream = TcpStream::connect_timeout(
            &addr,
            Duration::from_millis(self.config.connect_timeout_ms.max(1)),
        )?;
        stream.set_nodelay(true)?;

        if self.config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        }
        if self.config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(self.config.write_timeout_ms)))?;
        }

        Ok(stream)
    }
}
