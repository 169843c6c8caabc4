//! End-to-end tests over loopback TCP
//!
//! Full sender/responder transactions, error frames, and malformed wire
//! input against a live server.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use downlink::network::{Client, Server};
use downlink::protocol::PREAMBLE;
use downlink::{CodecRegistry, Config, LinkError, Method, TransferEngine};

/// Start a responder on an ephemeral port; returns its address and the
/// shutdown flag
fn start_satellite() -> (SocketAddr, Arc<AtomicBool>) {
    let config = Config::builder()
        .listen_addr("127.0.0.1:0")
        .read_timeout_ms(2000)
        .write_timeout_ms(2000)
        .build();

    let engine = Arc::new(TransferEngine::new(Arc::new(CodecRegistry::new())));
    let server = Server::bind(config, engine).unwrap();
    let addr = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();

    thread::spawn(move || {
        let _ = server.run();
    });

    (addr, shutdown)
}

fn client_for(addr: SocketAddr) -> Client {
    let config = Config::builder()
        .read_timeout_ms(2000)
        .connect_timeout_ms(2000)
        .build();
    Client::new(addr.to_string(), config)
}

#[test]
fn test_rle_transaction_over_tcp() {
    let (addr, shutdown) = start_satellite();
    let client = client_for(addr);

    // Pre-compress locally, the way the ground station does by default
    let registry = CodecRegistry::new();
    let original = vec![0x41u8; 300];
    let compressed = registry.compress(Method::Rle, &original).unwrap();

    let response = client.transfer(Method::Rle, &compressed).unwrap();

    assert_eq!(response.stats.original_size, 4);
    assert_eq!(response.stats.decompressed_size, 300);
    assert_eq!(response.stats.recompressed_size, 4);
    assert_eq!(
        response.payload.len(),
        response.stats.recompressed_size as usize
    );

    // The recompressed payload still decodes to the original
    let restored = registry.decompress(Method::Rle, &response.payload).unwrap();
    assert_eq!(restored, original);

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_zstd_transaction_over_tcp() {
    let (addr, shutdown) = start_satellite();
    let client = client_for(addr);

    let registry = CodecRegistry::new();
    let original = b"telemetry frame ".repeat(200);
    let compressed = registry.compress(Method::Zstd, &original).unwrap();

    let response = client.transfer(Method::Zstd, &compressed).unwrap();
    assert_eq!(response.stats.decompressed_size as usize, original.len());
    let restored = registry.decompress(Method::Zstd, &response.payload).unwrap();
    assert_eq!(restored, original);

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_empty_payload_transaction_over_tcp() {
    let (addr, shutdown) = start_satellite();
    let client = client_for(addr);

    let response = client.transfer(Method::Rle, b"").unwrap();
    assert_eq!(response.stats.original_size, 0);
    assert_eq!(response.stats.compression_ratio, 0.0);
    assert!(response.payload.is_empty());

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_garbage_payload_yields_remote_error() {
    let (addr, shutdown) = start_satellite();
    let client = client_for(addr);

    let err = client
        .transfer(Method::Deflate, b"garbage that is not deflate")
        .unwrap_err();
    match err {
        LinkError::Remote(message) => {
            assert!(message.contains("decompression failed"), "got: {message}");
        }
        other => panic!("expected Remote, got {other:?}"),
    }

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_sender_rejects_unknown_method_before_connecting() {
    // Sender path of the unsupported-method property: parsing fails, no
    // connection is ever attempted
    let err = "unknown_xyz".parse::<Method>().unwrap_err();
    assert!(matches!(err, LinkError::UnsupportedMethod(_)));
}

#[test]
fn test_responder_rejects_unknown_method() {
    let (addr, shutdown) = start_satellite();

    // Hand-rolled frame carrying a method the registry does not know
    let mut stream = TcpStream::connect(addr).unwrap();
    let mut frame = PREAMBLE.to_vec();
    frame.extend_from_slice(&0u32.to_be_bytes());
    frame.extend_from_slice(b"unknown_xyz\n");
    stream.write_all(&frame).unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(
        reply.contains("unsupported compression method"),
        "got: {reply}"
    );

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_responder_rejects_corrupt_preamble() {
    let (addr, shutdown) = start_satellite();

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(&[0x00, 0x00, 0x00, 0x00]).unwrap();
    stream.write_all(b"leftover bytes").unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(reply.contains("invalid preamble"), "got: {reply}");

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_responder_reports_truncated_length_header() {
    let (addr, shutdown) = start_satellite();

    // Close after 2 of the 4 length bytes; the responder must fail the
    // header read and never wait for a payload
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(&PREAMBLE).unwrap();
    stream.write_all(&[0x00, 0x01]).unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(reply.contains("truncated header"), "got: {reply}");

    shutdown.store(true, Ordering::Relaxed);
}

#[test]
fn test_sender_read_times_out_on_silent_responder() {
    // A peer that accepts the connection and the request but never replies;
    // the bounded read must surface Timeout instead of blocking forever
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let done = Arc::new(AtomicBool::new(false));
    let done_flag = Arc::clone(&done);

    let holder = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        // Hold the connection open, reading nothing back, until the client
        // has given up
        while !done_flag.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(10));
        }
        drop(stream);
    });

    let config = Config::builder()
        .connect_timeout_ms(2000)
        .read_timeout_ms(200)
        .build();
    let client = Client::new(addr.to_string(), config);

    let started = Instant::now();
    let err = client.transfer(Method::Rle, &[0x41, 3]).unwrap_err();
    assert!(matches!(err, LinkError::Timeout), "got: {err:?}");
    // The read gave up near its bound rather than hanging
    assert!(started.elapsed() < Duration::from_secs(2));

    done.store(true, Ordering::Relaxed);
    holder.join().unwrap();
}

#[test]
fn test_one_connection_per_transaction() {
    let (addr, shutdown) = start_satellite();
    let client = client_for(addr);

    // Two sequential transfers each get their own connection and both work
    for _ in 0..2 {
        let response = client.transfer(Method::Rle, &[0x41, 3]).unwrap();
        assert_eq!(response.stats.decompressed_size, 3);
    }

    shutdown.store(true, Ordering::Relaxed);
}
