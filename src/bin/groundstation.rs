//! Ground Station Binary
//!
//! The sender-side presentation layer: builds a payload from a file, a
//! literal string, or generated random bytes, optionally pre-compresses it
//! locally, sends it to the satellite, and prints the returned statistics.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use downlink::network::Client;
use downlink::payload::{random_payload, shannon_entropy};
use downlink::{CodecRegistry, Config, Method};

/// downlink ground station (sender)
#[derive(Parser, Debug)]
#[command(name = "groundstation")]
#[command(about = "Send a compressed payload to the satellite and report round-trip stats")]
#[command(version)]
struct Args {
    /// Satellite address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7122")]
    server: String,

    /// Compression method (deflate, gzip, lzma, brotli, lz4, zstd, bzip2, rle, lossless_image)
    #[arg(short, long, default_value = "deflate")]
    method: String,

    /// Send the payload as-is, without local pre-compression
    #[arg(long)]
    raw: bool,

    /// Read timeout in milliseconds
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    #[command(subcommand)]
    source: Source,
}

#[derive(Subcommand, Debug)]
enum Source {
    /// Send a literal string
    Text {
        /// The string to send
        text: String,
    },

    /// Send the contents of a file
    File {
        /// Path to the file
        path: PathBuf,
    },

    /// Send generated random bytes with a target entropy
    Random {
        /// Payload size in bytes
        #[arg(long, default_value = "1024")]
        size: usize,

        /// Target entropy in bits per byte (0 to 8)
        #[arg(long, default_value = "4.0")]
        entropy: f64,

        /// RNG seed (time-based when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,downlink=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let method: Method = match args.method.parse() {
        Ok(method) => method,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let payload = match build_payload(&args.source) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("failed to build payload: {e}");
            std::process::exit(2);
        }
    };

    println!("payload: {} bytes", payload.len());
    println!(
        "entropy: {:.2} bits per byte",
        shannon_entropy(&payload)
    );

    // The protocol is agnostic to who compresses first; by default we
    // pre-compress locally the way the original ground station did
    let registry = CodecRegistry::new();
    let sent = if args.raw {
        payload.clone()
    } else {
        match registry.compress(method, &payload) {
            Ok(compressed) => compressed,
            Err(e) => {
                eprintln!("local compression failed: {e}");
                std::process::exit(1);
            }
        }
    };

    if !args.raw {
        println!("compressed locally with {}: {} bytes", method, sent.len());
        if sent.len() < payload.len() {
            let reduction =
                (payload.len() - sent.len()) as f64 / payload.len() as f64 * 100.0;
            println!("local compression reduced the size by {reduction:.2}%");
        } else {
            println!("local compression did not reduce the size");
        }
    }

    let config = Config::builder()
        .read_timeout_ms(args.read_timeout_ms)
        .build();
    let client = Client::new(&args.server, config);

    println!("sending {} bytes to {}...", sent.len(), args.server);
    match client.transfer(method, &sent) {
        Ok(response) => {
            let stats = response.stats;
            println!("stats received from satellite:");
            println!("  original size:     {} bytes", stats.original_size);
            println!("  decompressed size: {} bytes", stats.decompressed_size);
            println!("  recompressed size: {} bytes", stats.recompressed_size);
            println!("  compression ratio: {:.2}%", stats.compression_ratio);
            println!("recompressed payload: {} bytes", response.payload.len());
        }
        Err(e) => {
            eprintln!("transfer failed: {e}");
            std::process::exit(1);
        }
    }
}

fn build_payload(source: &Source) -> downlink::Result<Vec<u8>> {
    match source {
        Source::Text { text } => Ok(text.clone().into_bytes()),
        Source::File { path } => Ok(std::fs::read(path)?),
        Source::Random {
            size,
            entropy,
            seed,
        } => {
            let seed = seed.unwrap_or_else(time_based_seed);
            random_payload(*size, *entropy, seed)
        }
    }
}

fn time_based_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
