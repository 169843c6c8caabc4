//! Satellite Binary
//!
//! Runs the responder: accepts connections and answers each one with
//! round-trip compression statistics.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use downlink::network::Server;
use downlink::{CodecRegistry, Config, TransferEngine};

/// downlink satellite (responder)
#[derive(Parser, Debug)]
#[command(name = "satellite")]
#[command(about = "Compression relay responder: decompress, recompress, report")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7122")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "64")]
    max_connections: usize,

    /// Stream read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Stream write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,downlink=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("downlink satellite v{}", downlink::VERSION);
    tracing::info!("listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let registry = Arc::new(CodecRegistry::new());
    tracing::info!("codec registry initialized with {} methods", registry.len());

    let engine = Arc::new(TransferEngine::new(registry));

    // Bind and serve
    let server = match Server::bind(config, engine) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("failed to bind listener: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("server stopped");
}
