//! Frame codec
//!
//! Exact byte-level (de)serialization of the request, response, and error
//! frames over a byte-oriented stream. See the module docs in
//! [`crate::protocol`] for the wire layouts.

use std::io::{ErrorKind, Read, Write};

use crate::codec::Method;
use crate::error::{LinkError, Result};

use super::{RequestFrame, ResponseFrame, TransferStats};

/// Fixed preamble marking the start of a request frame
pub const PREAMBLE: [u8; 4] = [0xAA, 0xBB, 0xCC, 0xDD];

/// Size of the fixed response header: three i32 fields + one f32 ratio
pub const RESPONSE_HEADER_SIZE: usize = 16;

/// Maximum accepted payload length (256 MB); the u32 length field allows
/// more, this guards allocation against hostile headers
pub const MAX_PAYLOAD_SIZE: u32 = 256 * 1024 * 1024;

/// Longest accepted method identifier while scanning for the terminator
const MAX_METHOD_LEN: usize = 64;

/// Cap on how much of a suspected error frame gets drained from the stream
const MAX_ERROR_FRAME_LEN: usize = 64 * 1024;

// =============================================================================
// Low-level stream helpers
// =============================================================================

/// Fill `buf` from the reader, looping over partial reads.
///
/// Returns the number of bytes actually read, which is less than `buf.len()`
/// only when the stream closed early. Socket timeouts surface as `Timeout`.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(ref e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Err(LinkError::Timeout);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

// =============================================================================
// Request frame
// =============================================================================

/// Encode a request frame to bytes
///
/// Layout: preamble (4) + payload length u32 BE (4) + method text + `\n` +
/// payload. Payloads above [`MAX_PAYLOAD_SIZE`] are rejected here; the
/// length field could not represent them honestly and the receiver would
/// refuse the declared length anyway.
pub fn encode_request(frame: &RequestFrame) -> Result<Vec<u8>> {
    if frame.payload.len() > MAX_PAYLOAD_SIZE as usize {
        return Err(LinkError::MalformedInput(format!(
            "payload of {} bytes exceeds the {MAX_PAYLOAD_SIZE} byte limit",
            frame.payload.len()
        )));
    }

    let method = frame.method.as_str().as_bytes();
    let mut message = Vec::with_capacity(4 + 4 + method.len() + 1 + frame.payload.len());

    message.extend_from_slice(&PREAMBLE);
    message.extend_from_slice(&(frame.payload.len() as u32).to_be_bytes());
    message.extend_from_slice(method);
    message.push(b'\n');
    message.extend_from_slice(&frame.payload);

    Ok(message)
}

/// Read a complete request frame from a stream
///
/// Validates the preamble before reading anything else; the payload is
/// accumulated across partial reads until the declared length is satisfied.
pub fn read_request<R: Read>(reader: &mut R) -> Result<RequestFrame> {
    // Preamble first; a mismatch rejects the frame before any payload is read
    let mut preamble = [0u8; 4];
    let got = read_full(reader, &mut preamble)?;
    if got == 0 {
        return Err(LinkError::ConnectionClosed);
    }
    if got < preamble.len() {
        return Err(LinkError::TruncatedHeader(format!(
            "preamble: expected 4 bytes, stream closed after {got}"
        )));
    }
    if preamble != PREAMBLE {
        return Err(LinkError::InvalidPreamble { found: preamble });
    }

    // Payload length, big-endian
    let mut len_bytes = [0u8; 4];
    let got = read_full(reader, &mut len_bytes)?;
    if got < len_bytes.len() {
        return Err(LinkError::TruncatedHeader(format!(
            "length field: expected 4 bytes, stream closed after {got}"
        )));
    }
    let payload_len = u32::from_be_bytes(len_bytes);
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(LinkError::MalformedInput(format!(
            "declared payload of {payload_len} bytes exceeds the {MAX_PAYLOAD_SIZE} byte limit"
        )));
    }

    // Method identifier, byte by byte up to the newline terminator
    let mut method_bytes = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        if read_full(reader, &mut byte)? == 0 {
            return Err(LinkError::TruncatedHeader(format!(
                "stream closed after {} method bytes with no terminator",
                method_bytes.len()
            )));
        }
        if byte[0] == b'\n' {
            break;
        }
        method_bytes.push(byte[0]);
        if method_bytes.len() > MAX_METHOD_LEN {
            return Err(LinkError::MalformedInput(format!(
                "method identifier longer than {MAX_METHOD_LEN} bytes"
            )));
        }
    }
    let method_text = std::str::from_utf8(&method_bytes)
        .map_err(|_| LinkError::MalformedInput("method identifier is not valid UTF-8".into()))?;
    let method: Method = method_text.parse()?;

    // Exactly `payload_len` bytes of payload
    let mut payload = vec![0u8; payload_len as usize];
    let got = read_full(reader, &mut payload)?;
    if got < payload.len() {
        return Err(LinkError::TruncatedPayload {
            declared: payload.len(),
            got,
        });
    }

    Ok(RequestFrame { method, payload })
}

/// Write a request frame to a stream
pub fn write_request<W: Write>(writer: &mut W, frame: &RequestFrame) -> Result<()> {
    writer.write_all(&encode_request(frame)?)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response frame
// =============================================================================

fn encode_stats(stats: &TransferStats) -> [u8; RESPONSE_HEADER_SIZE] {
    let mut header = [0u8; RESPONSE_HEADER_SIZE];
    header[0..4].copy_from_slice(&stats.original_size.to_le_bytes());
    header[4..8].copy_from_slice(&stats.decompressed_size.to_le_bytes());
    header[8..12].copy_from_slice(&stats.recompressed_size.to_le_bytes());
    header[12..16].copy_from_slice(&stats.compression_ratio.to_le_bytes());
    header
}

fn decode_stats(header: &[u8; RESPONSE_HEADER_SIZE]) -> TransferStats {
    TransferStats {
        original_size: i32::from_le_bytes([header[0], header[1], header[2], header[3]]),
        decompressed_size: i32::from_le_bytes([header[4], header[5], header[6], header[7]]),
        recompressed_size: i32::from_le_bytes([header[8], header[9], header[10], header[11]]),
        compression_ratio: f32::from_le_bytes([header[12], header[13], header[14], header[15]]),
    }
}

/// Encode a response frame to bytes
///
/// Layout: 16-byte fixed header (three i32 sizes + f32 ratio, little-endian)
/// followed by exactly `recompressed_size` payload bytes.
pub fn encode_response(frame: &ResponseFrame) -> Vec<u8> {
    let mut message = Vec::with_capacity(RESPONSE_HEADER_SIZE + frame.payload.len());
    message.extend_from_slice(&encode_stats(&frame.stats));
    message.extend_from_slice(&frame.payload);
    message
}

/// Read a complete response frame from a stream
///
/// The payload is accumulated in chunks of at most `chunk_size` bytes until
/// the header-declared length is satisfied.
pub fn read_response<R: Read>(reader: &mut R, chunk_size: usize) -> Result<ResponseFrame> {
    let mut header = [0u8; RESPONSE_HEADER_SIZE];
    let got = read_full(reader, &mut header)?;
    if got == 0 {
        return Err(LinkError::ConnectionClosed);
    }
    if got < RESPONSE_HEADER_SIZE {
        return Err(LinkError::TruncatedHeader(format!(
            "response header: expected {RESPONSE_HEADER_SIZE} bytes, stream closed after {got}"
        )));
    }

    let stats = decode_stats(&header);
    validate_header(&stats)?;

    let declared = stats.recompressed_size as usize;
    let payload = read_payload_chunks(reader, declared, chunk_size)?;
    if payload.len() < declared {
        return Err(LinkError::TruncatedPayload {
            declared,
            got: payload.len(),
        });
    }

    Ok(ResponseFrame { stats, payload })
}

fn validate_header(stats: &TransferStats) -> Result<()> {
    if stats.recompressed_size < 0 || stats.recompressed_size as u32 > MAX_PAYLOAD_SIZE {
        return Err(LinkError::MalformedInput(format!(
            "implausible recompressed size {} in response header",
            stats.recompressed_size
        )));
    }
    if stats.original_size < 0 || stats.decompressed_size < 0 {
        return Err(LinkError::MalformedInput(
            "negative size field in response header".into(),
        ));
    }
    Ok(())
}

/// Accumulate `declared` payload bytes in bounded chunks.
///
/// Returns the bytes collected; the payload is complete only when its length
/// reaches `declared` (the stream closing early leaves it short).
fn read_payload_chunks<R: Read>(
    reader: &mut R,
    declared: usize,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    let chunk_size = chunk_size.max(1);
    let mut payload = Vec::with_capacity(declared.min(MAX_PAYLOAD_SIZE as usize));
    let mut chunk = vec![0u8; chunk_size];

    while payload.len() < declared {
        let want = (declared - payload.len()).min(chunk_size);
        let got = read_full(reader, &mut chunk[..want])?;
        payload.extend_from_slice(&chunk[..got]);
        if got < want {
            break;
        }
    }

    Ok(payload)
}

/// Write a response frame to a stream
pub fn write_response<W: Write>(writer: &mut W, frame: &ResponseFrame) -> Result<()> {
    writer.write_all(&encode_response(frame))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Error frame
// =============================================================================

/// Write an error frame: the raw UTF-8 message in place of a response
pub fn write_error<W: Write>(writer: &mut W, message: &str) -> Result<()> {
    writer.write_all(message.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read either a response frame or an error frame from a stream.
///
/// An error frame carries no tag of its own, so it can only be recognized
/// after the fact: when the header read falls short, or the header fields
/// fail their shape expectations, the bytes received so far are
/// re-interpreted as UTF-8 text and surfaced as [`LinkError::Remote`]. A
/// response whose leading bytes coincidentally form readable text could in
/// principle be misread; that ambiguity is inherent to the untagged frame
/// format.
pub fn read_reply<R: Read>(reader: &mut R, chunk_size: usize) -> Result<ResponseFrame> {
    let mut header = [0u8; RESPONSE_HEADER_SIZE];
    let got = read_full(reader, &mut header)?;
    if got == 0 {
        return Err(LinkError::ConnectionClosed);
    }
    if got < RESPONSE_HEADER_SIZE {
        // Too short for a response header; likely a short error message
        return Err(reinterpret_as_remote(
            &header[..got],
            LinkError::TruncatedHeader(format!(
                "response header: expected {RESPONSE_HEADER_SIZE} bytes, stream closed after {got}"
            )),
        ));
    }

    let stats = decode_stats(&header);
    if let Err(shape_err) = validate_header(&stats) {
        // Implausible sizes; drain the rest and try to read it all as text
        let mut collected = header.to_vec();
        drain_remaining(reader, &mut collected)?;
        return Err(reinterpret_as_remote(&collected, shape_err));
    }

    let declared = stats.recompressed_size as usize;
    let payload = read_payload_chunks(reader, declared, chunk_size)?;
    if payload.len() < declared {
        // The declared length was never satisfied; everything received so
        // far may actually be an error message
        let mut collected = header.to_vec();
        collected.extend_from_slice(&payload);
        return Err(reinterpret_as_remote(
            &collected,
            LinkError::TruncatedPayload {
                declared,
                got: payload.len(),
            },
        ));
    }

    Ok(ResponseFrame { stats, payload })
}

/// Pull whatever else the peer sent, stopping at close, timeout, or the cap
fn drain_remaining<R: Read>(reader: &mut R, collected: &mut Vec<u8>) -> Result<()> {
    let mut chunk = [0u8; 1024];
    while collected.len() < MAX_ERROR_FRAME_LEN {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => collected.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(ref e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Interpret `bytes` as an error-frame message if they look like one,
/// otherwise fall back to the framing error that was hit
fn reinterpret_as_remote(bytes: &[u8], fallback: LinkError) -> LinkError {
    match std::str::from_utf8(bytes) {
        Ok(text) if looks_textual(text) => LinkError::Remote(text.trim_end().to_string()),
        _ => fallback,
    }
}

fn looks_textual(text: &str) -> bool {
    !text.trim().is_empty()
        && text
            .chars()
            .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
}
