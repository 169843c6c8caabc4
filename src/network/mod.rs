//! Network Module
//!
//! TCP endpoints for both roles of the link.
//!
//! ## Architecture
//! - Single acceptor thread, one worker thread per connection
//! - One connection carries exactly one transaction
//! - Transactions routed through the shared TransferEngine

mod client;
mod connection;
mod server;

pub use client::Client;
pub use connection::Connection;
pub use server::Server;
