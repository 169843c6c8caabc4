//! Payload helpers
//!
//! Entropy estimation and random-payload generation for the presentation
//! layer. Stateless, no protocol relevance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{LinkError, Result};

/// Shannon entropy of a byte slice in bits per byte (0.0 for empty input)
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0usize; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let total = data.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Generate `size` bytes with roughly `target_entropy` bits per byte.
///
/// 0 produces a single repeated byte, 8 produces uniform random bytes, and
/// anything in between draws from a restricted alphabet of `2^h` symbols.
/// Deterministic for a given seed.
pub fn random_payload(size: usize, target_entropy: f64, seed: u64) -> Result<Vec<u8>> {
    if !(0.0..=8.0).contains(&target_entropy) {
        return Err(LinkError::Config(format!(
            "target entropy must be between 0 and 8 bits per byte, got {target_entropy}"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    if target_entropy == 0.0 {
        let value: u8 = rng.gen();
        return Ok(vec![value; size]);
    }
    if target_entropy == 8.0 {
        return Ok((0..size).map(|_| rng.gen()).collect());
    }

    let num_symbols = (2f64.powf(target_entropy) as usize).clamp(1, 256);
    Ok((0..size)
        .map(|_| rng.gen_range(0..num_symbols) as u8)
        .collect())
}
