//! Benchmarks for downlink codec round trips

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use downlink::{CodecRegistry, Method};

/// Mixed-compressibility sample: half runs, half pseudo-random
fn sample_payload(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = 0x2545F4914F6CDD1Du64;
    while data.len() < size {
        if data.len() % 512 < 256 {
            data.push(0x41);
        } else {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            data.push(state as u8);
        }
    }
    data
}

fn codec_benchmarks(c: &mut Criterion) {
    let registry = CodecRegistry::new();
    let payload = sample_payload(64 * 1024);

    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for method in [Method::Rle, Method::Deflate, Method::Lz4, Method::Zstd] {
        group.bench_function(method.as_str(), |b| {
            b.iter(|| registry.compress(method, &payload).unwrap())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("round_trip");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for method in [Method::Rle, Method::Deflate, Method::Lz4, Method::Zstd] {
        let compressed = registry.compress(method, &payload).unwrap();
        group.bench_function(method.as_str(), |b| {
            b.iter_batched(
                || compressed.clone(),
                |c| {
                    let decompressed = registry.decompress(method, &c).unwrap();
                    registry.compress(method, &decompressed).unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
