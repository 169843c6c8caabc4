//! # downlink
//!
//! A ground-station/satellite compression relay with:
//! - A framed binary transfer protocol over TCP
//! - A codec capability table covering seven compression algorithms plus a
//!   lossy image recompression path
//! - A round-trip engine that decompresses, recompresses, and reports
//!   compression statistics per transaction
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐  request frame   ┌──────────────┐
//! │ Ground       │ ───────────────► │  Satellite   │
//! │ Station      │                  │  (Responder) │
//! │ (Sender)     │ ◄─────────────── │              │
//! └──────────────┘  response frame  └──────┬───────┘
//!                   or error frame         │
//!                                          ▼
//!                                  ┌──────────────┐
//!                                  │   Transfer   │
//!                                  │    Engine    │
//!                                  └──────┬───────┘
//!                                         │
//!                                         ▼
//!                                  ┌──────────────┐
//!                                  │    Codec     │
//!                                  │   Registry   │
//!                                  └──────────────┘
//! ```
//!
//! One connection carries exactly one transaction: the responder reads a
//! single request frame, decompresses and recompresses its payload with the
//! declared method, and answers with statistics and the recompressed bytes.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod protocol;
pub mod engine;
pub mod network;
pub mod payload;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use codec::{CodecRegistry, Method};
pub use config::Config;
pub use engine::{TransferEngine, TransferOutcome};
pub use error::{LinkError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of downlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
