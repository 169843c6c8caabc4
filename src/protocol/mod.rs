//! Protocol Module
//!
//! Defines the wire protocol exchanged between the ground station (sender)
//! and the satellite (responder). One connection carries exactly one
//! request/response exchange.
//!
//! ## Request Frame (sender -> responder)
//! ```text
//! ┌────────────────┬──────────┬───────────────┬─────────────────┐
//! │ Preamble (4)   │ Len (4)  │ Method + \n   │     Payload     │
//! │ AA BB CC DD    │ u32 BE   │ UTF-8 text    │  (Len bytes)    │
//! └────────────────┴──────────┴───────────────┴─────────────────┘
//! ```
//! The newline terminator is not part of the method identifier and is not
//! counted in the length field.
//!
//! ## Response Frame (responder -> sender)
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┬───────────────────────┐
//! │orig (4) │ dec (4) │ rec (4) │ratio (4)│  Recompressed payload │
//! │ i32 LE  │ i32 LE  │ i32 LE  │ f32 LE  │     (rec bytes)       │
//! └─────────┴─────────┴─────────┴─────────┴───────────────────────┘
//! ```
//!
//! ## Error Frame (responder -> sender)
//! A raw UTF-8 message written in place of a response whenever responder-side
//! processing fails. The sender can only tell it apart from a response by the
//! header read failing its length/shape expectations after the fact; see
//! [`read_reply`] for how that ambiguity is resolved and why it is a known
//! weakness of the format.

mod codec;
mod frame;

pub use codec::{
    encode_request, encode_response, read_reply, read_request, read_response, write_error,
    write_request, write_response, MAX_PAYLOAD_SIZE, PREAMBLE, RESPONSE_HEADER_SIZE,
};
pub use frame::{RequestFrame, ResponseFrame, TransferStats};
